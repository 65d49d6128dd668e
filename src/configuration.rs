use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use url::Url;

#[derive(Clone, Debug)]
pub struct Configuration {
    pub database_path: PathBuf,
    pub api_listen: SocketAddr,
    pub storage_timeout: Duration,
    pub log_file: Option<String>,
    pub reset: bool,
}

/// Resolves a `sqlite:` connection string to a database file path.
///
/// `sqlite://dir/file.sqlite` is relative to the working directory,
/// `sqlite:///abs/file.sqlite` is absolute, and `sqlite:file.sqlite` is accepted too.
pub fn database_path(database_url: &str) -> Result<PathBuf> {
    let url = Url::parse(database_url)
        .with_context(|| format!("invalid database url '{database_url}'"))?;
    if url.scheme() != "sqlite" {
        bail!(
            "unsupported database url scheme '{}', expected 'sqlite'",
            url.scheme()
        );
    }

    let path = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
    if path.is_empty() {
        bail!("database url '{database_url}' has no path");
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_and_absolute_paths() {
        assert_eq!(
            database_path("sqlite://.clique/clique.sqlite").unwrap(),
            PathBuf::from(".clique/clique.sqlite")
        );
        assert_eq!(
            database_path("sqlite:///var/lib/clique/clique.sqlite").unwrap(),
            PathBuf::from("/var/lib/clique/clique.sqlite")
        );
        assert_eq!(
            database_path("sqlite:clique.sqlite").unwrap(),
            PathBuf::from("clique.sqlite")
        );
    }

    #[test]
    fn rejects_other_schemes_and_empty_paths() {
        let err = database_path("mongodb://localhost:27017").unwrap_err();
        assert!(err.to_string().contains("unsupported database url scheme"));
        assert!(database_path("sqlite://").is_err());
        assert!(database_path("not a url").is_err());
    }
}
