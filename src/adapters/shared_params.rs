//! Shared parameter file store
//!
//! Shared parameter definitions live in a tab-separated text file outside
//! any document, so the same definitions (same guids) can be bound in many
//! documents. The file has three sections, each introduced by a `*` header
//! row:
//!
//! ```text
//! *META   VERSION MINVERSION
//! META    2       1
//! *GROUP  ID      NAME
//! GROUP   1       CncFab
//! *PARAM  GUID    NAME    DATATYPE        DATACATEGORY    GROUP   VISIBLE DESCRIPTION     USERMODIFIABLE
//! PARAM   <guid>  CncFabIsExported        YESNO           1       1               1
//! ```
//!
//! Lines starting with `#` are comments. An empty file is a valid, empty
//! store.

use crate::domain::errors::CncFabError;
use crate::domain::result::Result;
use crate::model::element::ParameterType;
use crate::model::parameters::Definition;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const META_VERSION: &str = "2";
const META_MIN_VERSION: &str = "1";

/// A named group of definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionGroup {
    /// Numeric group id, unique within the file
    pub id: u32,
    /// Group name
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ExternalDefinition {
    definition: Definition,
    group_id: u32,
    visible: bool,
    description: String,
}

/// An opened shared parameter file
#[derive(Debug, Clone)]
pub struct SharedParameterFile {
    path: PathBuf,
    groups: Vec<DefinitionGroup>,
    definitions: Vec<ExternalDefinition>,
    modified: bool,
}

impl SharedParameterFile {
    /// Create an empty file at `path`, truncating anything already there
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create_empty(path: &Path) -> Result<()> {
        File::create(path).map_err(|e| {
            CncFabError::SharedParameters(format!(
                "Failed to create shared parameter file {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::info!(path = %path.display(), "Created empty shared parameter file");
        Ok(())
    }

    /// Open and parse a shared parameter file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CncFabError::SharedParameters(format!(
                "Shared parameter file {} does not exist",
                path.display()
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .from_path(path)?;

        let mut groups = Vec::new();
        let mut definitions = Vec::new();

        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let line = index + 1;
            match record.get(0) {
                Some("GROUP") => groups.push(parse_group(&record, line)?),
                Some("PARAM") => definitions.push(parse_param(&record, line)?),
                _ => {}
            }
        }

        tracing::debug!(
            path = %path.display(),
            groups = groups.len(),
            definitions = definitions.len(),
            "Opened shared parameter file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            groups,
            definitions,
            modified: false,
        })
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether groups or definitions were added since opening
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// All groups
    pub fn groups(&self) -> &[DefinitionGroup] {
        &self.groups
    }

    /// Look up a group by name
    pub fn group(&self, name: &str) -> Option<&DefinitionGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Look up a group by name, creating it if absent
    pub fn get_or_create_group(&mut self, name: &str) -> DefinitionGroup {
        if let Some(group) = self.group(name) {
            return group.clone();
        }

        let id = self.groups.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        let group = DefinitionGroup {
            id,
            name: name.to_string(),
        };
        tracing::info!(group = %name, id, "Created shared parameter group");
        self.groups.push(group.clone());
        self.modified = true;
        group
    }

    /// Look up a definition by name within a group
    pub fn definition(&self, group: &DefinitionGroup, name: &str) -> Option<&Definition> {
        self.definitions
            .iter()
            .find(|d| d.group_id == group.id && d.definition.name == name)
            .map(|d| &d.definition)
    }

    /// Look up a definition by name within a group, creating it if absent
    ///
    /// An existing definition is returned as is, even if its type differs
    /// from `parameter_type`.
    pub fn get_or_create_definition(
        &mut self,
        group: &DefinitionGroup,
        name: &str,
        parameter_type: ParameterType,
    ) -> Definition {
        if let Some(existing) = self.definition(group, name) {
            if existing.parameter_type != parameter_type {
                tracing::warn!(
                    parameter = %name,
                    expected = ?parameter_type,
                    found = ?existing.parameter_type,
                    "Shared parameter exists with a different type"
                );
            }
            return existing.clone();
        }

        let definition = Definition::new(Uuid::new_v4(), name, parameter_type);
        tracing::info!(
            parameter = %name,
            guid = %definition.guid,
            group = %group.name,
            "Created shared parameter definition"
        );
        self.push_definition(group, definition.clone());
        definition
    }

    /// Add a definition that already exists elsewhere, keeping its guid
    ///
    /// Does nothing if the group already holds a definition with that name.
    /// Returns `true` if the definition was added.
    pub fn adopt_definition(&mut self, group: &DefinitionGroup, definition: &Definition) -> bool {
        if let Some(existing) = self.definition(group, &definition.name) {
            if existing.guid != definition.guid {
                tracing::warn!(
                    parameter = %definition.name,
                    file_guid = %existing.guid,
                    bound_guid = %definition.guid,
                    "Shared parameter file and document disagree on the definition guid"
                );
            }
            return false;
        }

        tracing::info!(
            parameter = %definition.name,
            guid = %definition.guid,
            group = %group.name,
            "Adopted bound definition into shared parameter file"
        );
        self.push_definition(group, definition.clone());
        true
    }

    fn push_definition(&mut self, group: &DefinitionGroup, definition: Definition) {
        self.definitions.push(ExternalDefinition {
            definition,
            group_id: group.id,
            visible: true,
            description: String::new(),
        });
        self.modified = true;
    }

    /// Write the store back to its file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let mut file = File::create(&self.path)?;
        writeln!(file, "# This is a shared parameter file.")?;
        writeln!(file, "# Do not edit manually.")?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(file);

        writer.write_record(["*META", "VERSION", "MINVERSION"])?;
        writer.write_record(["META", META_VERSION, META_MIN_VERSION])?;

        writer.write_record(["*GROUP", "ID", "NAME"])?;
        for group in &self.groups {
            let id = group.id.to_string();
            writer.write_record(["GROUP", id.as_str(), group.name.as_str()])?;
        }

        writer.write_record([
            "*PARAM",
            "GUID",
            "NAME",
            "DATATYPE",
            "DATACATEGORY",
            "GROUP",
            "VISIBLE",
            "DESCRIPTION",
            "USERMODIFIABLE",
        ])?;
        for entry in &self.definitions {
            let d = &entry.definition;
            let guid = d.guid.to_string();
            let group_id = entry.group_id.to_string();
            writer.write_record([
                "PARAM",
                guid.as_str(),
                d.name.as_str(),
                d.parameter_type.as_file_token(),
                "",
                group_id.as_str(),
                if entry.visible { "1" } else { "0" },
                entry.description.as_str(),
                "1",
            ])?;
        }
        writer.flush()?;

        self.modified = false;
        tracing::debug!(path = %self.path.display(), "Saved shared parameter file");
        Ok(())
    }
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, line: usize) -> Result<&'r str> {
    record.get(index).ok_or_else(|| {
        CncFabError::SharedParameters(format!("Line {line}: missing field {index}"))
    })
}

fn parse_group(record: &csv::StringRecord, line: usize) -> Result<DefinitionGroup> {
    let id = field(record, 1, line)?
        .trim()
        .parse::<u32>()
        .map_err(|e| CncFabError::SharedParameters(format!("Line {line}: invalid group id: {e}")))?;
    Ok(DefinitionGroup {
        id,
        name: field(record, 2, line)?.to_string(),
    })
}

fn parse_param(record: &csv::StringRecord, line: usize) -> Result<ExternalDefinition> {
    let guid = Uuid::parse_str(field(record, 1, line)?.trim())
        .map_err(|e| CncFabError::SharedParameters(format!("Line {line}: invalid guid: {e}")))?;
    let name = field(record, 2, line)?;
    let data_type = field(record, 3, line)?;
    let parameter_type = ParameterType::from_file_token(data_type).ok_or_else(|| {
        CncFabError::SharedParameters(format!(
            "Line {line}: unsupported data type '{data_type}' for '{name}'"
        ))
    })?;
    let group_id = field(record, 5, line)?
        .trim()
        .parse::<u32>()
        .map_err(|e| CncFabError::SharedParameters(format!("Line {line}: invalid group id: {e}")))?;

    Ok(ExternalDefinition {
        definition: Definition::new(guid, name, parameter_type),
        group_id,
        visible: record.get(6).map(|v| v.trim() != "0").unwrap_or(true),
        description: record.get(7).unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        SharedParameterFile::create_empty(&path).unwrap();

        let file = SharedParameterFile::open(&path).unwrap();
        assert!(file.groups().is_empty());
        assert!(file.group("CncFab").is_none());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = SharedParameterFile::open(&dir.path().join("none.txt")).unwrap_err();
        assert!(matches!(err, CncFabError::SharedParameters(_)));
    }

    #[test]
    fn test_get_or_create_is_stable_across_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        SharedParameterFile::create_empty(&path).unwrap();

        let mut file = SharedParameterFile::open(&path).unwrap();
        let group = file.get_or_create_group("CncFab");
        let created = file.get_or_create_definition(&group, "CncFabIsExported", ParameterType::YesNo);
        assert!(file.is_modified());
        file.save().unwrap();

        let mut reopened = SharedParameterFile::open(&path).unwrap();
        let group = reopened.get_or_create_group("CncFab");
        assert_eq!(group.id, 1);
        let again = reopened.get_or_create_definition(&group, "CncFabIsExported", ParameterType::YesNo);
        assert_eq!(again, created);
        assert!(!reopened.is_modified());
    }

    #[test]
    fn test_adopt_keeps_guid_and_skips_existing_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        SharedParameterFile::create_empty(&path).unwrap();

        let mut file = SharedParameterFile::open(&path).unwrap();
        let group = file.get_or_create_group("CncFab");
        let bound = Definition::new(Uuid::new_v4(), "CncFabExportedLast", ParameterType::Text);
        assert!(file.adopt_definition(&group, &bound));
        assert_eq!(file.definition(&group, "CncFabExportedLast"), Some(&bound));

        let other = Definition::new(Uuid::new_v4(), "CncFabExportedLast", ParameterType::Text);
        assert!(!file.adopt_definition(&group, &other));
        assert_eq!(file.definition(&group, "CncFabExportedLast").unwrap().guid, bound.guid);
    }

    #[test]
    fn test_parses_hand_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        let guid = Uuid::new_v4();
        fs::write(
            &path,
            format!(
                "# comment\n*META\tVERSION\tMINVERSION\nMETA\t2\t1\n*GROUP\tID\tNAME\nGROUP\t3\tOther\n\
                 *PARAM\tGUID\tNAME\tDATATYPE\tDATACATEGORY\tGROUP\tVISIBLE\n\
                 PARAM\t{guid}\tCncFabSortMark\tTEXT\t\t3\t1\n"
            ),
        )
        .unwrap();

        let mut file = SharedParameterFile::open(&path).unwrap();
        let other = file.group("Other").unwrap().clone();
        assert_eq!(other.id, 3);
        assert_eq!(file.definition(&other, "CncFabSortMark").unwrap().guid, guid);

        let new_group = file.get_or_create_group("CncFab");
        assert_eq!(new_group.id, 4);
    }

    #[test]
    fn test_unsupported_data_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        fs::write(
            &path,
            format!("PARAM\t{}\tWidth\tLENGTH\t\t1\t1\n", Uuid::new_v4()),
        )
        .unwrap();
        assert!(SharedParameterFile::open(&path).is_err());
    }
}
