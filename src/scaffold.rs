use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::day::Day;
use crate::templates;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Day {0} already exists!")]
    AlreadyExists(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Files that live in each `src/dayNN/` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFile {
    Solution,
    Test,
    Input,
    Problem,
}

impl DayFile {
    pub fn file_name(self) -> &'static str {
        match self {
            DayFile::Solution => "solution.ts",
            DayFile::Test => "test.ts",
            DayFile::Input => "input.txt",
            DayFile::Problem => "problem.md",
        }
    }
}

/// The puzzle workspace rooted at the directory that holds `src/`.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace { root: root.into() }
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn day_dir(&self, day: Day) -> PathBuf {
        self.root.join(Self::relative_day_dir(day))
    }

    fn relative_day_dir(day: Day) -> PathBuf {
        Path::new("src").join(format!("day{}", day.padded()))
    }

    /// Path relative to the workspace root, as handed to the runner.
    pub fn relative(&self, day: Day, file: DayFile) -> PathBuf {
        Self::relative_day_dir(day).join(file.file_name())
    }

    pub fn path(&self, day: Day, file: DayFile) -> PathBuf {
        self.root.join(self.relative(day, file))
    }

    pub fn exists(&self, day: Day, file: DayFile) -> bool {
        self.path(day, file).is_file()
    }

    /// Days with the given file present, in order.
    pub fn days_with(&self, file: DayFile) -> Vec<Day> {
        Day::all().filter(|d| self.exists(*d, file)).collect()
    }

    /// Create `src/dayNN/` with solution, test and empty input files, plus
    /// the shared input helper if it isn't there yet.
    pub fn create_day(&self, day: Day) -> Result<PathBuf, ScaffoldError> {
        let dir = self.day_dir(day);
        if dir.exists() {
            return Err(ScaffoldError::AlreadyExists(day.padded()));
        }
        fs::create_dir_all(&dir).map_err(|source| ScaffoldError::Io {
            path: dir.clone(),
            source,
        })?;

        self.write(day, DayFile::Solution, &templates::solution(day))?;
        self.write(day, DayFile::Test, &templates::test(day))?;
        self.write(day, DayFile::Input, "")?;
        self.ensure_input_helper()?;

        info!("Created scaffold in {}", dir.display());
        Ok(dir)
    }

    pub fn write(&self, day: Day, file: DayFile, contents: &str) -> Result<PathBuf, ScaffoldError> {
        let path = self.path(day, file);
        write_file(&path, contents)?;
        Ok(path)
    }

    fn ensure_input_helper(&self) -> Result<(), ScaffoldError> {
        let utils = self.src_dir().join("utils");
        let helper = utils.join("input.ts");
        if helper.exists() {
            return Ok(());
        }
        fs::create_dir_all(&utils).map_err(|source| ScaffoldError::Io {
            path: utils.clone(),
            source,
        })?;
        write_file(&helper, templates::INPUT_HELPER)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    debug!("Writing {}", path.display());
    fs::write(path, contents).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> Day {
        Day::try_from(n).unwrap()
    }

    #[test]
    fn creates_day_files() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::new(tmp.path());
        let dir = ws.create_day(day(5)).unwrap();

        assert_eq!(dir, tmp.path().join("src").join("day05"));
        let solution = fs::read_to_string(dir.join("solution.ts")).unwrap();
        assert!(solution.contains("const day = '05';"));
        assert!(dir.join("test.ts").is_file());
        assert_eq!(fs::read_to_string(dir.join("input.txt")).unwrap(), "");
        assert!(tmp.path().join("src/utils/input.ts").is_file());
    }

    #[test]
    fn refuses_existing_day() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::new(tmp.path());
        ws.create_day(day(1)).unwrap();
        let err = ws.create_day(day(1)).unwrap_err();
        assert!(matches!(err, ScaffoldError::AlreadyExists(ref d) if d == "01"));
        assert_eq!(err.to_string(), "Day 01 already exists!");
    }

    #[test]
    fn keeps_existing_input_helper() {
        let tmp = tempfile::tempdir().unwrap();
        let utils = tmp.path().join("src/utils");
        fs::create_dir_all(&utils).unwrap();
        fs::write(utils.join("input.ts"), "// custom").unwrap();

        Workspace::new(tmp.path()).create_day(day(2)).unwrap();
        assert_eq!(fs::read_to_string(utils.join("input.ts")).unwrap(), "// custom");
    }

    #[test]
    fn writes_problem_file() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::new(tmp.path());
        ws.create_day(day(9)).unwrap();
        let path = ws.write(day(9), DayFile::Problem, "# Title\n").unwrap();
        assert_eq!(path, tmp.path().join("src/day09/problem.md"));
        assert_eq!(fs::read_to_string(path).unwrap(), "# Title\n");
    }

    #[test]
    fn write_into_missing_dir_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::new(tmp.path());
        let err = ws.write(day(4), DayFile::Problem, "x").unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }));
    }

    #[test]
    fn lists_days_with_solutions() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = Workspace::new(tmp.path());
        ws.create_day(day(3)).unwrap();
        ws.create_day(day(11)).unwrap();
        assert_eq!(ws.days_with(DayFile::Solution), vec![day(3), day(11)]);
    }

    #[test]
    fn relative_paths() {
        let ws = Workspace::new("/somewhere");
        assert_eq!(ws.relative(day(7), DayFile::Test), PathBuf::from("src/day07/test.ts"));
        assert_eq!(ws.path(day(7), DayFile::Test), PathBuf::from("/somewhere/src/day07/test.ts"));
    }
}
