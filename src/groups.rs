use anyhow::{bail, Context, Result};
use regex::Regex;
use tracing::debug;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::summary::Record;

#[derive(Debug)]
struct Group {
    name: String,
    regex: Regex,
}

/// Folds department name variants into canonical departments.
///
/// With no groups defined, every department is reported under its own name.
#[derive(Debug, Default)]
pub struct Groups(Vec<Group>);

impl Groups {
    /// Reads department group configuration from `path`.
    ///
    /// The configuration file consists of group specifications, one per line,
    /// in the following format:
    ///
    /// ```txt
    /// GROUP_NAME | GROUP_REGEX
    /// ```
    ///
    /// Blank lines are ignored.
    ///
    /// # Examples
    ///
    /// ```txt
    /// Sales | (?i)^sales
    /// ```
    ///
    /// With this group defined, records from departments named `Sales`,
    /// `sales` or `Sales EMEA` are all counted under `Sales`.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * The file cannot be opened
    /// * The file cannot be read
    /// * There is a line with an invalid format (no `|` character)
    /// * `GROUP_REGEX` is an invalid regular expression
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut groups = Self::default();
        let file =
            BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
        for line in file.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let Some((name, regex_str)) = line.split_once(" | ") else {
                bail!("reading {path:?}: bad line format (missing |): {line}");
            };
            groups
                .add_group(name, regex_str)
                .with_context(|| format!("reading {path:?}"))?;
        }
        debug!(path = %path.display(), groups = groups.0.len(), "loaded department groups");
        Ok(groups)
    }

    /// Adds a new group.
    ///
    /// Departments whose name matches `regex_str` will be reported as part of
    /// group `name`.
    ///
    /// # Errors
    ///
    /// Returns any errors from compiling `regex_str` with [`Regex::new`].
    pub fn add_group(&mut self, name: &str, regex_str: &str) -> Result<()> {
        self.0.push(Group {
            name: name.trim().to_string(),
            regex: Regex::new(regex_str.trim())?,
        });
        Ok(())
    }

    /// Returns the group for `department`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sales_report::Groups;
    /// let mut groups = Groups::default();
    /// groups.add_group("Sales", "(?i)^sales").unwrap();
    /// assert_eq!(groups.department_group("sales emea"), Some("Sales"));
    /// assert_eq!(groups.department_group("HR"), None);
    /// ```
    #[must_use]
    pub fn department_group(&self, department: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|g| g.regex.is_match(department))
            .map(|g| g.name.as_str())
    }

    /// Moves `record` into its department's group, if it has one.
    #[must_use]
    pub fn apply(&self, mut record: Record) -> Record {
        if let Some(group) = self.department_group(&record.department) {
            record.department = group.to_string();
        }
        record
    }
}
