#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::process::Command as ProcCommand;

use tempfile::TempDir;

pub fn database_path(data_dir: &TempDir) -> PathBuf {
    data_dir.path().join("clique.sqlite")
}

pub fn env_cmd(data_dir: &TempDir) -> ProcCommand {
    let mut command = ProcCommand::new(env!("CARGO_BIN_EXE_clique"));

    command
        .env("DOTENV_PATH", data_dir.path().join("missing.env"))
        .env("RUST_LOG", "info");

    command
}

pub fn base_cmd(data_dir: &TempDir) -> ProcCommand {
    let mut command = env_cmd(data_dir);

    command
        .arg("--database-url")
        .arg(format!("sqlite://{}", database_path(data_dir).display()));

    command
}

pub fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr")
}
