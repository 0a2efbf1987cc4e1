//! Display texts and status tone for hosts that draw the screen.

use crate::types::FilterChoice;

/// One row of a picker modal, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOption<F> {
    /// Clears the filter.
    All,
    Value { value: F, label: String },
    Cancel,
}

impl<F: FilterChoice> PickerOption<F> {
    pub fn label(&self) -> &str {
        match self {
            PickerOption::All => "All",
            PickerOption::Value { label, .. } => label,
            PickerOption::Cancel => "Cancel",
        }
    }
}

/// Picker title, e.g. "Select Gender".
pub fn picker_title<F: FilterChoice>() -> String {
    format!("Select {}", F::PLACEHOLDER)
}

/// "All", then each candidate, then "Cancel".
pub fn picker_options<F: FilterChoice>() -> Vec<PickerOption<F>> {
    let candidates = F::CANDIDATES.iter().filter_map(|&value| {
        value.as_query_value().map(|raw| PickerOption::Value {
            value,
            label: capitalize(raw),
        })
    });
    std::iter::once(PickerOption::All)
        .chain(candidates)
        .chain(std::iter::once(PickerOption::Cancel))
        .collect()
}

/// Text on the filter button: the placeholder while unset, otherwise the
/// capitalized value.
pub fn filter_button_label<F: FilterChoice>(filter: F) -> String {
    filter
        .as_query_value()
        .map(capitalize)
        .unwrap_or_else(|| F::PLACEHOLDER.to_string())
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Color class for a character's status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Alive,
    Dead,
    Neutral,
}

impl StatusTone {
    /// Case-insensitive: the API's capitalization is not guaranteed to match
    /// the lowercase filter values.
    pub fn from_status(status: &str) -> Self {
        let status = status.trim();
        if status.eq_ignore_ascii_case("alive") {
            StatusTone::Alive
        } else if status.eq_ignore_ascii_case("dead") {
            StatusTone::Dead
        } else {
            StatusTone::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenderFilter, StatusFilter};

    #[test]
    fn gender_picker_rows() {
        let labels: Vec<String> = picker_options::<GenderFilter>()
            .iter()
            .map(|o| o.label().to_string())
            .collect();
        assert_eq!(labels, ["All", "Male", "Female", "Genderless", "Unknown", "Cancel"]);
    }

    #[test]
    fn status_picker_rows_carry_values() {
        let options = picker_options::<StatusFilter>();
        assert_eq!(options.first(), Some(&PickerOption::All));
        assert_eq!(options.last(), Some(&PickerOption::Cancel));
        assert_eq!(
            options[2],
            PickerOption::Value {
                value: StatusFilter::Dead,
                label: "Dead".to_string()
            }
        );
    }

    #[test]
    fn titles() {
        assert_eq!(picker_title::<GenderFilter>(), "Select Gender");
        assert_eq!(picker_title::<StatusFilter>(), "Select Status");
    }

    #[test]
    fn button_labels() {
        assert_eq!(filter_button_label(GenderFilter::All), "Gender");
        assert_eq!(filter_button_label(GenderFilter::Genderless), "Genderless");
        assert_eq!(filter_button_label(StatusFilter::All), "Status");
        assert_eq!(filter_button_label(StatusFilter::Alive), "Alive");
    }

    #[test]
    fn tone_ignores_case() {
        assert_eq!(StatusTone::from_status("Dead"), StatusTone::Dead);
        assert_eq!(StatusTone::from_status("dead"), StatusTone::Dead);
        assert_eq!(StatusTone::from_status("ALIVE"), StatusTone::Alive);
        assert_eq!(StatusTone::from_status("unknown"), StatusTone::Neutral);
        assert_eq!(StatusTone::from_status(""), StatusTone::Neutral);
    }
}
