use serde::Serialize;

/// Industries offered by the assessment form's select
pub const INDUSTRIES: [&str; 8] = [
    "Technology",
    "Healthcare",
    "Retail",
    "Food Service",
    "Manufacturing",
    "Professional Services",
    "Construction",
    "Other",
];

/// Business types as (submitted value, display label)
pub const BUSINESS_TYPES: [(&str, &str); 4] = [
    ("llc", "LLC"),
    ("corporation", "Corporation"),
    ("partnership", "Partnership"),
    ("sole-proprietorship", "Sole Proprietorship"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Choices the UI renders for the two select fields of the form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub industries: Vec<SelectOption>,
    pub business_types: Vec<SelectOption>,
}

impl FormOptions {
    pub fn standard() -> Self {
        Self {
            industries: INDUSTRIES
                .iter()
                .map(|name| SelectOption {
                    value: name.to_string(),
                    label: name.to_string(),
                })
                .collect(),
            business_types: BUSINESS_TYPES
                .iter()
                .map(|(value, label)| SelectOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_options() {
        let options = FormOptions::standard();
        assert_eq!(options.industries.len(), 8);
        assert_eq!(options.industries[3].value, "Food Service");

        let sole = options.business_types.last().unwrap();
        assert_eq!(sole.value, "sole-proprietorship");
        assert_eq!(sole.label, "Sole Proprietorship");
    }
}
