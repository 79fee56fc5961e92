use chrono::NaiveDate;

use crate::table::{ColumnSpec, Record};

/// The nine fields of an employee record, in table column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    StartDate,
    Department,
    DateOfBirth,
    Street,
    City,
    State,
    ZipCode,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::StartDate,
        Field::Department,
        Field::DateOfBirth,
        Field::Street,
        Field::City,
        Field::State,
        Field::ZipCode,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::StartDate => "startDate",
            Field::Department => "department",
            Field::DateOfBirth => "dateOfBirth",
            Field::Street => "street",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zipCode",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::StartDate => "Start Date",
            Field::Department => "Department",
            Field::DateOfBirth => "Date of Birth",
            Field::Street => "Street",
            Field::City => "City",
            Field::State => "State",
            Field::ZipCode => "Zip Code",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Field::DateOfBirth | Field::StartDate)
    }
}

/// Whether `value` is a calendar date written as `YYYY-MM-DD`. Only this
/// form keeps the string sort of date columns in date order.
pub fn is_iso_date(value: &str) -> bool {
    let shape = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    shape && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

pub const DEPARTMENTS: [&str; 5] = [
    "Sales",
    "Marketing",
    "Engineering",
    "Human Resources",
    "Legal",
];

/// One employee. All values are kept as strings, dates as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub start_date: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub department: String,
}

impl Employee {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::StartDate => &self.start_date,
            Field::Department => &self.department,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::ZipCode => &self.zip_code,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::StartDate => &mut self.start_date,
            Field::Department => &mut self.department,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::Street => &mut self.street,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::ZipCode => &mut self.zip_code,
        }
    }

    /// Fields that are still empty, in table column order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|&f| self.field(f).is_empty())
            .collect()
    }

    /// Date fields that are filled in but not a valid `YYYY-MM-DD` date.
    pub fn invalid_dates(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| f.is_date())
            .filter(|&f| !self.field(f).is_empty() && !is_iso_date(self.field(f)))
            .collect()
    }
}

impl Record for Employee {
    fn value(&self, key: &str) -> Option<&str> {
        Field::from_key(key).map(|f| self.field(f))
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.department)
    }
}

/// Columns of the employee list.
pub fn employee_columns() -> Vec<ColumnSpec> {
    Field::ALL
        .iter()
        .map(|f| ColumnSpec::new(f.key(), f.label()))
        .collect()
}

#[cfg(test)]
pub(crate) fn sample(first: &str, last: &str, department: &str) -> Employee {
    Employee {
        first_name: first.into(),
        last_name: last.into(),
        date_of_birth: "1990-01-01".into(),
        start_date: "2020-01-01".into(),
        street: "1 Main St".into(),
        city: "Springfield".into(),
        state: "IL".into(),
        zip_code: "62701".into(),
        department: department.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key() {
        let e = sample("Ada", "Lovelace", "Engineering");
        assert_eq!(e.value("lastName"), Some("Lovelace"));
        assert_eq!(e.value("zipCode"), Some("62701"));
        assert_eq!(e.value("salary"), None);
    }

    #[test]
    fn only_iso_dates_are_valid() {
        assert!(is_iso_date("1815-12-10"));
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-29"));
        assert!(!is_iso_date("2024-1-02"));
        assert!(!is_iso_date("12/31/1999"));
        assert!(!is_iso_date("+2024-01-0"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn invalid_dates_skips_empty_fields() {
        let mut e = sample("Ada", "Lovelace", "Engineering");
        assert!(e.invalid_dates().is_empty());
        e.start_date = "not a date".into();
        e.date_of_birth.clear();
        assert_eq!(e.invalid_dates(), vec![Field::StartDate]);
    }

    #[test]
    fn search_text_joins_names_and_department() {
        let e = sample("Ada", "Lovelace", "Engineering");
        assert_eq!(e.search_text(), "Ada Lovelace Engineering");
    }

    #[test]
    fn columns_follow_list_order() {
        let headers: Vec<String> = employee_columns().into_iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            vec![
                "First Name",
                "Last Name",
                "Start Date",
                "Department",
                "Date of Birth",
                "Street",
                "City",
                "State",
                "Zip Code"
            ]
        );
    }

    #[test]
    fn missing_fields_reports_empty_values() {
        let mut e = sample("Ada", "Lovelace", "Engineering");
        e.city.clear();
        e.zip_code.clear();
        assert_eq!(e.missing_fields(), vec![Field::City, Field::ZipCode]);
        for f in Field::ALL {
            assert_eq!(Field::from_key(f.key()), Some(f));
        }
    }
}
