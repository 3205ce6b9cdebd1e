use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use env_logger::{Builder, Env, Target};

/// Next free `baseball_NN.log` in `dir`, numbered by how many entries the
/// directory already holds. Creates the directory if needed.
pub fn next_log_file(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let index = fs::read_dir(dir)?.count();

    Ok(dir.join(format!("baseball_{:02}.log", index)))
}

/// Initializes the global logger. `RUST_LOG` overrides the `info` default.
/// Returns the log file in use, `None` when logging to stderr.
pub fn init(dir: &Path, to_stderr: bool) -> io::Result<Option<PathBuf>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    if to_stderr {
        builder.init();
        return Ok(None);
    }

    let path = next_log_file(dir)?;
    let file = File::create(&path)?;
    builder.target(Target::Pipe(Box::new(file))).init();

    Ok(Some(path))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_numbering_counts_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        assert_eq!(next_log_file(&logs).unwrap(), logs.join("baseball_00.log"));

        fs::write(logs.join("baseball_00.log"), "").unwrap();
        fs::write(logs.join("notes.txt"), "").unwrap();

        assert_eq!(next_log_file(&logs).unwrap(), logs.join("baseball_02.log"));
    }
}
