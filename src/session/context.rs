use serde::Serialize;

/// What the conversation talked about most recently.
///
/// Fields only ever move from one non-empty value to another: a turn that
/// does not mention a city keeps the previous city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DialogContext {
    pub last_city: Option<String>,
    pub last_requirement: Option<String>,
    pub last_date: Option<String>,
}

impl DialogContext {
    pub fn remember(&mut self, city: Option<&str>, requirement: Option<&str>, date: Option<&str>) {
        update_field(&mut self.last_city, city);
        update_field(&mut self.last_requirement, requirement);
        update_field(&mut self.last_date, date);
    }

    pub fn is_empty(&self) -> bool {
        self.last_city.is_none() && self.last_requirement.is_none() && self.last_date.is_none()
    }
}

fn update_field(slot: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        *slot = Some(value.to_string());
    }
}
