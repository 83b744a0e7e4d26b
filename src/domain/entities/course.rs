use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseKind {
    #[serde(rename = "Blok")]
    Blok,
    #[serde(rename = "Non Blok")]
    NonBlok,
}

impl CourseKind {
    pub fn parse(text: &str) -> Option<CourseKind> {
        match text.trim() {
            "Blok" => Some(CourseKind::Blok),
            "Non Blok" => Some(CourseKind::NonBlok),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseKind::Blok => "Blok",
            CourseKind::NonBlok => "Non Blok",
        }
    }
}

impl std::fmt::Display for CourseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub kode: String,
    pub nama: String,
    pub semester: i64,
    pub periode: String,
    pub jenis: CourseKind,
    pub kurikulum: i64,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_akhir: NaiveDate,
    #[serde(default)]
    pub blok: Option<i64>,
    pub durasi_minggu: i64,
}

/// Create/update payload; `kode` doubles as the path key on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCourse {
    pub kode: String,
    pub nama: String,
    pub semester: i64,
    pub periode: String,
    pub jenis: CourseKind,
    pub kurikulum: i64,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_akhir: NaiveDate,
    pub blok: Option<i64>,
    pub durasi_minggu: i64,
}
