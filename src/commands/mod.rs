use crate::cli::Command;
use crate::storage::CollectionStore;

pub mod reclassify;

impl Command {
    pub fn run<S: CollectionStore + ?Sized>(&self, store: &S) -> anyhow::Result<()> {
        match self {
            Command::Reclassify { dry_run } => reclassify::run(store, *dry_run),
        }
    }
}
