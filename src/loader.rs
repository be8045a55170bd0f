//! File-system access for the textual machine format: load a machine from a
//! `.tm` file or a string, save one back, or scan a directory.

use crate::encoder::encode;
use crate::machine::Machine;
use crate::parser::parse;
use crate::types::MachineError;
use std::fs;
use std::path::{Path, PathBuf};

/// The file extension machine text files are stored under.
const MACHINE_EXTENSION: &str = "tm";

/// `MachineLoader` is a utility struct for reading and writing machine text
/// files. File-system failures surface as [`MachineError::File`] with the
/// offending path in the message.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine from the given file path.
    pub fn load(path: &Path) -> Result<Machine, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single machine from in-memory machine text.
    pub fn load_from_string(content: &str) -> Result<Machine, MachineError> {
        parse(content)
    }

    /// Writes the machine's textual form to the given file path.
    pub fn save(machine: &Machine, path: &Path) -> Result<(), MachineError> {
        fs::write(path, encode(machine)).map_err(|e| {
            MachineError::File(format!("Failed to write file {}: {}", path.display(), e))
        })
    }

    /// Loads every `.tm` file in a directory, returning one result per file.
    /// Sub-directories and files with other extensions are skipped.
    pub fn load_machines(directory: &Path) -> Vec<Result<(PathBuf, Machine), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::File(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::File(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::File(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir()
                    || path
                        .extension()
                        .map_or(true, |ext| ext != MACHINE_EXTENSION)
                {
                    return None;
                }

                match Self::load(&path) {
                    Ok(machine) => Some(Ok((path, machine))),
                    Err(e) => Some(Err(MachineError::File(format!(
                        "Failed to load machine from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::finder;
    use crate::types::{Direction, Status, BLANK_SYMBOL};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("finder.tm");

        let alphabet = ['a', ':', BLANK_SYMBOL];
        let machine = finder(':', Direction::Right, &alphabet);
        MachineLoader::save(&machine, &path).unwrap();

        let mut reread = MachineLoader::load(&path).unwrap();
        assert_eq!(reread.transitions(), machine.transitions());
        assert_eq!(reread.initial_state(), machine.initial_state());

        reread.load_input("aa:");
        assert_eq!(reread.run(10), Status::Accept);
    }

    #[test]
    fn test_load_from_string() {
        let content = "init: A\naccept: B\n\nA,x\nB,x,>";
        let machine = MachineLoader::load_from_string(content).unwrap();
        assert_eq!(machine.initial_state(), "A");
        assert_eq!(machine.transitions().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = MachineLoader::load(&dir.path().join("absent.tm"));
        assert!(matches!(result, Err(MachineError::File(_))));
    }

    #[test]
    fn test_load_invalid_machine() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.tm");

        let mut file = File::create(&path).unwrap();
        file.write_all(b"This is not a machine").unwrap();

        let result = MachineLoader::load(&path);
        assert!(matches!(result, Err(MachineError::Format(_))));
    }

    #[test]
    fn test_load_machines_from_directory() {
        let dir = tempdir().unwrap();

        let valid_path = dir.path().join("valid.tm");
        let mut valid_file = File::create(&valid_path).unwrap();
        valid_file
            .write_all(b"init: A\naccept: B\n\nA,x\nB,x,>")
            .unwrap();

        let invalid_path = dir.path().join("invalid.tm");
        let mut invalid_file = File::create(&invalid_path).unwrap();
        invalid_file.write_all(b"not a machine").unwrap();

        let ignored_path = dir.path().join("ignored.txt");
        let mut ignored_file = File::create(&ignored_path).unwrap();
        ignored_file.write_all(b"should be skipped").unwrap();

        let results = MachineLoader::load_machines(dir.path());
        assert_eq!(results.len(), 2);

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let failures = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(successes, 1);
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_load_machines_from_missing_directory() {
        let dir = tempdir().unwrap();
        let results = MachineLoader::load_machines(&dir.path().join("absent"));
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
