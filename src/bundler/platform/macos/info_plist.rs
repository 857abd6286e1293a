//! `Contents/Info.plist` model.
//!
//! Only the keys this bundler produces are modelled. Serialized with
//! `plist` in the binary format Launch Services reads fastest.

use crate::bundler::error::Result;
use crate::bundler::settings::TypeRole;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `CFBundlePackageType` of an application.
pub const PACKAGE_TYPE_APPL: &str = "APPL";

/// Parent type every exported data file type conforms to.
pub const PUBLIC_DATA: &str = "public.data";

/// Bundle metadata written to `Contents/Info.plist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoPlist {
    /// Name of the file in `Contents/MacOS` to run.
    #[serde(rename = "CFBundleExecutable")]
    pub executable: String,

    /// Always [`PACKAGE_TYPE_APPL`].
    #[serde(rename = "CFBundlePackageType")]
    pub package_type: String,

    /// User visible name.
    #[serde(rename = "CFBundleDisplayName")]
    pub display_name: String,

    /// Reverse-domain bundle identifier.
    #[serde(rename = "CFBundleIdentifier")]
    pub identifier: String,

    /// File name (not path) of the `.icns` in `Contents/Resources`.
    #[serde(
        rename = "CFBundleIconFile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_file: Option<String>,

    /// Document types the application opens.
    #[serde(
        rename = "CFBundleDocumentTypes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub document_types: Vec<DocumentType>,

    /// Uniform types the application defines.
    #[serde(
        rename = "UTExportedTypeDeclarations",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exported_types: Vec<ExportedType>,
}

/// One `CFBundleDocumentTypes` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentType {
    /// Uniform type identifiers covered by this entry.
    #[serde(rename = "LSItemContentTypes")]
    pub content_types: Vec<String>,

    /// Human readable type name.
    #[serde(rename = "CFBundleTypeName")]
    pub type_name: String,

    /// What the application does with such documents.
    #[serde(rename = "CFBundleTypeRole")]
    pub role: TypeRole,
}

/// One `UTExportedTypeDeclarations` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedType {
    /// The declared uniform type identifier.
    #[serde(rename = "UTTypeIdentifier")]
    pub identifier: String,

    /// Tags (file extensions) mapping to the type.
    #[serde(rename = "UTTypeTagSpecification")]
    pub tag_specification: TypeTagSpecification,

    /// Parent type, [`PUBLIC_DATA`].
    #[serde(rename = "UTTypeConformsTo")]
    pub conforms_to: String,

    /// Human readable description.
    #[serde(rename = "UTTypeDescription")]
    pub description: String,
}

/// `UTTypeTagSpecification` dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTagSpecification {
    /// Extension without the leading period.
    #[serde(rename = "public.filename-extension")]
    pub filename_extension: String,
}

impl InfoPlist {
    /// Skeleton metadata for a freshly initialized bundle.
    pub fn new(executable: &str, display_name: &str, identifier: &str) -> Self {
        Self {
            executable: executable.to_string(),
            package_type: PACKAGE_TYPE_APPL.to_string(),
            display_name: display_name.to_string(),
            identifier: identifier.to_string(),
            icon_file: None,
            document_types: Vec::new(),
            exported_types: Vec::new(),
        }
    }

    /// Replaces the registered file type with a single document/exported pair.
    pub fn set_file_type(
        &mut self,
        type_identifier: &str,
        extension: &str,
        role: TypeRole,
    ) {
        let type_name = format!("{} datafile", self.display_name);

        self.document_types = vec![DocumentType {
            content_types: vec![type_identifier.to_string()],
            type_name: type_name.clone(),
            role,
        }];
        self.exported_types = vec![ExportedType {
            identifier: type_identifier.to_string(),
            tag_specification: TypeTagSpecification {
                filename_extension: extension.to_string(),
            },
            conforms_to: PUBLIC_DATA.to_string(),
            description: type_name,
        }];
    }

    /// Binary property list bytes.
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        plist::to_writer_binary(&mut bytes, self)?;
        Ok(bytes)
    }

    /// Parses a property list in any format `plist` understands.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(plist::from_bytes(bytes)?)
    }

    /// Reads `Info.plist` from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(plist::from_file(path)?)
    }
}
