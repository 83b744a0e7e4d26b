use std::collections::HashSet;

use regex::Regex;

use crate::domain::entities::lecturer::Lecturer;
use crate::domain::entities::sheet::SheetData;
use crate::domain::entities::validation::{FieldError, ValidationResult};
use crate::domain::rules::{
    field_text, missing_headers_message, missing_required_headers, HeaderSpec, ImportRules,
    EMPTY_FILE_MESSAGE,
};

const MIN_PASSWORD_LEN: usize = 6;

const NID: HeaderSpec = HeaderSpec {
    canonical: "nid",
    aliases: &[],
    label: "NID",
    required_header: true,
    required_value: true,
};
const NIDN: HeaderSpec = HeaderSpec {
    canonical: "nidn",
    aliases: &[],
    label: "NIDN",
    required_header: true,
    required_value: true,
};
const NAMA: HeaderSpec = HeaderSpec {
    canonical: "nama",
    aliases: &["name"],
    label: "Nama",
    required_header: true,
    required_value: true,
};
const USERNAME: HeaderSpec = HeaderSpec {
    canonical: "username",
    aliases: &[],
    label: "Username",
    required_header: true,
    required_value: true,
};
const EMAIL: HeaderSpec = HeaderSpec {
    canonical: "email",
    aliases: &[],
    label: "Email",
    required_header: true,
    required_value: true,
};
const TELEPON: HeaderSpec = HeaderSpec {
    canonical: "telepon",
    aliases: &["telp"],
    label: "Telepon",
    required_header: true,
    required_value: true,
};
const PASSWORD: HeaderSpec = HeaderSpec {
    canonical: "password",
    aliases: &[],
    label: "Password",
    required_header: true,
    required_value: true,
};
const KOMPETENSI: HeaderSpec = HeaderSpec {
    canonical: "kompetensi",
    aliases: &[],
    label: "Kompetensi",
    required_header: true,
    required_value: true,
};
const PERAN_DALAM_KURIKULUM: HeaderSpec = HeaderSpec {
    canonical: "peran_dalam_kurikulum",
    aliases: &[],
    label: "Peran dalam Kurikulum",
    required_header: true,
    required_value: true,
};
const KEAHLIAN: HeaderSpec = HeaderSpec {
    canonical: "keahlian",
    aliases: &[],
    label: "Keahlian",
    required_header: false,
    required_value: false,
};

const HEADERS: &[HeaderSpec] = &[
    NID,
    NIDN,
    NAMA,
    USERNAME,
    EMAIL,
    TELEPON,
    PASSWORD,
    KOMPETENSI,
    PERAN_DALAM_KURIKULUM,
    KEAHLIAN,
];

pub struct LecturerRules {
    numeric: Regex,
    email: Regex,
}

impl LecturerRules {
    pub fn new() -> Self {
        LecturerRules {
            numeric: Regex::new(r"^[0-9]+$").unwrap(),
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap(),
        }
    }
}

impl Default for LecturerRules {
    fn default() -> Self {
        LecturerRules::new()
    }
}

impl ImportRules for LecturerRules {
    type Entity = Lecturer;

    fn headers(&self) -> &'static [HeaderSpec] {
        HEADERS
    }

    fn validate(&self, sheet: &SheetData, existing: &[Lecturer]) -> ValidationResult {
        if sheet.rows.is_empty() {
            return ValidationResult::summary_only(EMPTY_FILE_MESSAGE);
        }

        let missing = missing_required_headers(&sheet.headers, HEADERS);
        if !missing.is_empty() {
            return ValidationResult::summary_only(missing_headers_message(&missing));
        }

        let db_nid: HashSet<&str> = existing.iter().map(|l| l.nid.as_str()).collect();
        let db_nidn: HashSet<&str> = existing.iter().map(|l| l.nidn.as_str()).collect();
        let db_username: HashSet<String> =
            existing.iter().map(|l| l.username.to_lowercase()).collect();
        let db_email: HashSet<String> = existing.iter().map(|l| l.email.to_lowercase()).collect();

        let mut seen_nid = HashSet::new();
        let mut seen_nidn = HashSet::new();
        let mut seen_username = HashSet::new();
        let mut seen_email = HashSet::new();

        let mut cell_errors = Vec::new();
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let nid = field_text(row, &NID);
            let nidn = field_text(row, &NIDN);
            let username = field_text(row, &USERNAME);
            let email = field_text(row, &EMAIL);
            let telepon = field_text(row, &TELEPON);
            let password = field_text(row, &PASSWORD);
            let natural_key = (!nid.is_empty()).then(|| nid.clone());

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

            if !nid.is_empty() && !self.numeric.is_match(&nid) {
                push(&NID, "NID harus berupa angka".to_string());
            }
            if !nidn.is_empty() && !self.numeric.is_match(&nidn) {
                push(&NIDN, "NIDN harus berupa angka".to_string());
            }
            if !telepon.is_empty() && !self.numeric.is_match(&telepon) {
                push(&TELEPON, "Telepon harus berupa angka".to_string());
            }
            if !email.is_empty() && !self.email.is_match(&email) {
                push(&EMAIL, "Email tidak valid".to_string());
            }
            if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LEN {
                push(
                    &PASSWORD,
                    format!("Password minimal {MIN_PASSWORD_LEN} karakter"),
                );
            }

            // First occurrence of a value is accepted; later ones are flagged.
            if !nid.is_empty() && !seen_nid.insert(nid.clone()) {
                push(&NID, "NID sudah terdaftar dalam file ini".to_string());
            }
            if !nidn.is_empty() && !seen_nidn.insert(nidn.clone()) {
                push(&NIDN, "NIDN sudah terdaftar dalam file ini".to_string());
            }
            if !username.is_empty() && !seen_username.insert(username.to_lowercase()) {
                push(&USERNAME, "Username sudah terdaftar dalam file ini".to_string());
            }
            if !email.is_empty() && !seen_email.insert(email.to_lowercase()) {
                push(&EMAIL, "Email sudah terdaftar dalam file ini".to_string());
            }

            if !nid.is_empty() && db_nid.contains(nid.as_str()) {
                push(&NID, "NID sudah terdaftar dalam database".to_string());
            }
            if !nidn.is_empty() && db_nidn.contains(nidn.as_str()) {
                push(&NIDN, "NIDN sudah terdaftar dalam database".to_string());
            }
            if !username.is_empty() && db_username.contains(&username.to_lowercase()) {
                push(&USERNAME, "Username sudah terdaftar dalam database".to_string());
            }
            if !email.is_empty() && db_email.contains(&email.to_lowercase()) {
                push(&EMAIL, "Email sudah terdaftar dalam database".to_string());
            }
        }

        ValidationResult {
            summary_errors: Vec::new(),
            cell_errors,
        }
    }
}
