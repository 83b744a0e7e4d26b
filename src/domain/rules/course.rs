use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::entities::course::{Course, CourseKind};
use crate::domain::entities::sheet::SheetData;
use crate::domain::entities::validation::{FieldError, ValidationResult};
use crate::domain::rules::{
    field_text, missing_headers_message, missing_required_headers, HeaderSpec, ImportRules,
    EMPTY_FILE_MESSAGE,
};

const MAX_BLOK_PER_SEMESTER: usize = 4;
const MAX_NON_BLOK_PER_SEMESTER: usize = 1;
const DATE_FORMAT: &str = "%Y-%m-%d";

const KODE: HeaderSpec = HeaderSpec {
    canonical: "kode",
    aliases: &[],
    label: "Kode",
    required_header: true,
    required_value: true,
};
const NAMA: HeaderSpec = HeaderSpec {
    canonical: "nama",
    aliases: &[],
    label: "Nama",
    required_header: true,
    required_value: true,
};
const SEMESTER: HeaderSpec = HeaderSpec {
    canonical: "semester",
    aliases: &[],
    label: "Semester",
    required_header: true,
    required_value: true,
};
const PERIODE: HeaderSpec = HeaderSpec {
    canonical: "periode",
    aliases: &[],
    label: "Periode",
    required_header: true,
    required_value: true,
};
const JENIS: HeaderSpec = HeaderSpec {
    canonical: "jenis",
    aliases: &[],
    label: "Jenis",
    required_header: true,
    required_value: true,
};
const KURIKULUM: HeaderSpec = HeaderSpec {
    canonical: "kurikulum",
    aliases: &[],
    label: "Kurikulum",
    required_header: true,
    required_value: true,
};
const TANGGAL_MULAI: HeaderSpec = HeaderSpec {
    canonical: "tanggal_mulai",
    aliases: &[],
    label: "Tanggal Mulai",
    required_header: true,
    required_value: true,
};
const TANGGAL_AKHIR: HeaderSpec = HeaderSpec {
    canonical: "tanggal_akhir",
    aliases: &[],
    label: "Tanggal Akhir",
    required_header: true,
    required_value: true,
};
// The blok column must exist; its value is only required for jenis Blok.
const BLOK: HeaderSpec = HeaderSpec {
    canonical: "blok",
    aliases: &[],
    label: "Blok",
    required_header: true,
    required_value: false,
};
const DURASI_MINGGU: HeaderSpec = HeaderSpec {
    canonical: "durasi_minggu",
    aliases: &[],
    label: "Durasi Minggu",
    required_header: true,
    required_value: true,
};

const HEADERS: &[HeaderSpec] = &[
    KODE,
    NAMA,
    SEMESTER,
    PERIODE,
    JENIS,
    KURIKULUM,
    TANGGAL_MULAI,
    TANGGAL_AKHIR,
    BLOK,
    DURASI_MINGGU,
];

pub struct CourseRules {
    numeric: Regex,
}

impl CourseRules {
    pub fn new() -> Self {
        CourseRules {
            numeric: Regex::new(r"^[0-9]+$").unwrap(),
        }
    }
}

impl Default for CourseRules {
    fn default() -> Self {
        CourseRules::new()
    }
}

impl ImportRules for CourseRules {
    type Entity = Course;

    fn headers(&self) -> &'static [HeaderSpec] {
        HEADERS
    }

    fn validate(&self, sheet: &SheetData, existing: &[Course]) -> ValidationResult {
        if sheet.rows.is_empty() {
            return ValidationResult::summary_only(EMPTY_FILE_MESSAGE);
        }

        let missing = missing_required_headers(&sheet.headers, HEADERS);
        if !missing.is_empty() {
            return ValidationResult::summary_only(missing_headers_message(&missing));
        }

        let db_kode: HashSet<&str> = existing.iter().map(|course| course.kode.as_str()).collect();
        let mut seen_kode = HashSet::new();

        let mut cell_errors = Vec::new();
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let kode = field_text(row, &KODE);
            let semester = field_text(row, &SEMESTER);
            let jenis = field_text(row, &JENIS);
            let kurikulum = field_text(row, &KURIKULUM);
            let blok = field_text(row, &BLOK);
            let durasi = field_text(row, &DURASI_MINGGU);
            let mulai = field_text(row, &TANGGAL_MULAI);
            let akhir = field_text(row, &TANGGAL_AKHIR);
            let natural_key = (!kode.is_empty()).then(|| kode.clone());

            let mut push = |field: &HeaderSpec, message: String| {
                cell_errors.push(FieldError {
                    row: row_idx,
                    field: field.canonical.to_string(),
                    message,
                    natural_key: natural_key.clone(),
                });
            };

            for spec in HEADERS.iter().filter(|spec| spec.required_value) {
                if field_text(row, spec).is_empty() {
                    push(spec, format!("{} wajib diisi", spec.label));
                }
            }

            if !semester.is_empty() && !self.numeric.is_match(&semester) {
                push(&SEMESTER, "Semester harus berupa angka".to_string());
            }
            if !kurikulum.is_empty() && !self.numeric.is_match(&kurikulum) {
                push(&KURIKULUM, "Kurikulum harus berupa angka".to_string());
            }
            if !blok.is_empty() && !self.numeric.is_match(&blok) {
                push(&BLOK, "Blok harus berupa angka".to_string());
            }
            if !durasi.is_empty() && !self.numeric.is_match(&durasi) {
                push(&DURASI_MINGGU, "Durasi Minggu harus berupa angka".to_string());
            }
            if !mulai.is_empty() && NaiveDate::parse_from_str(&mulai, DATE_FORMAT).is_err() {
                push(
                    &TANGGAL_MULAI,
                    "Tanggal Mulai harus berformat YYYY-MM-DD".to_string(),
                );
            }
            if !akhir.is_empty() && NaiveDate::parse_from_str(&akhir, DATE_FORMAT).is_err() {
                push(
                    &TANGGAL_AKHIR,
                    "Tanggal Akhir harus berformat YYYY-MM-DD".to_string(),
                );
            }
            if !jenis.is_empty() && CourseKind::parse(&jenis).is_none() {
                push(&JENIS, "Jenis harus Blok atau Non Blok".to_string());
            }

            if CourseKind::parse(&jenis) == Some(CourseKind::Blok) && blok.is_empty() {
                push(
                    &BLOK,
                    "Blok wajib diisi untuk mata kuliah jenis Blok".to_string(),
                );
            }

            if !kode.is_empty() && !seen_kode.insert(kode.clone()) {
                push(&KODE, "Kode sudah terdaftar dalam file ini".to_string());
            }
            if !kode.is_empty() && db_kode.contains(kode.as_str()) {
                push(&KODE, "Kode sudah terdaftar dalam database".to_string());
            }
        }

        ValidationResult {
            summary_errors: quota_violations(sheet, existing),
            cell_errors,
        }
    }
}

/// Merged existing ∪ incoming counts per semester: at most 4 Blok and
/// 1 Non Blok. Evaluated once over the whole set, reported as summary
/// errors in ascending semester order.
fn quota_violations(sheet: &SheetData, existing: &[Course]) -> Vec<String> {
    let mut blok_counts: BTreeMap<i64, usize> = BTreeMap::new();
    let mut non_blok_counts: BTreeMap<i64, usize> = BTreeMap::new();

    for course in existing {
        let counts = match course.jenis {
            CourseKind::Blok => &mut blok_counts,
            CourseKind::NonBlok => &mut non_blok_counts,
        };
        *counts.entry(course.semester).or_insert(0) += 1;
    }

    for row in &sheet.rows {
        let semester = match field_text(row, &SEMESTER).parse::<i64>() {
            Ok(value) => value,
            Err(_) => continue,
        };
        let counts = match CourseKind::parse(&field_text(row, &JENIS)) {
            Some(CourseKind::Blok) => &mut blok_counts,
            Some(CourseKind::NonBlok) => &mut non_blok_counts,
            None => continue,
        };
        *counts.entry(semester).or_insert(0) += 1;
    }

    let semesters: BTreeSet<i64> = blok_counts
        .keys()
        .chain(non_blok_counts.keys())
        .copied()
        .collect();

    let mut violations = Vec::new();
    for semester in semesters {
        let blok = blok_counts.get(&semester).copied().unwrap_or(0);
        if blok > MAX_BLOK_PER_SEMESTER {
            violations.push(format!(
                "Jumlah mata kuliah Blok pada semester {semester} melebihi batas: {blok} dari maksimal {MAX_BLOK_PER_SEMESTER}"
            ));
        }
        let non_blok = non_blok_counts.get(&semester).copied().unwrap_or(0);
        if non_blok > MAX_NON_BLOK_PER_SEMESTER {
            violations.push(format!(
                "Jumlah mata kuliah Non Blok pada semester {semester} melebihi batas: {non_blok} dari maksimal {MAX_NON_BLOK_PER_SEMESTER}"
            ));
        }
    }
    violations
}
