use serde::{Deserialize, Serialize};

/// A list-valued field the backend serves either as a comma-joined string or
/// as a real array. Normalized through `items()` at every read site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Parsed(Vec<String>),
    Raw(String),
}

impl StringList {
    pub fn items(&self) -> Vec<String> {
        match self {
            StringList::Parsed(values) => values
                .iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
            StringList::Raw(value) => value
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl Default for StringList {
    fn default() -> Self {
        StringList::Raw(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: i64,
    #[serde(default)]
    pub nid: String,
    #[serde(default)]
    pub nidn: String,
    #[serde(alias = "name")]
    pub nama: String,
    pub username: String,
    pub email: String,
    #[serde(default, alias = "telp")]
    pub telepon: String,
    #[serde(default)]
    pub kompetensi: StringList,
    #[serde(default)]
    pub keahlian: StringList,
    #[serde(default)]
    pub peran_dalam_kurikulum: StringList,
}

/// Create/update payload; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLecturer {
    pub nid: String,
    pub nidn: String,
    pub nama: String,
    pub username: String,
    pub email: String,
    pub telepon: String,
    pub password: String,
    pub kompetensi: Vec<String>,
    pub keahlian: Vec<String>,
    pub peran_dalam_kurikulum: Vec<String>,
}
