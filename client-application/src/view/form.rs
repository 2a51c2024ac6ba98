use client_domain::{
    clamp_chars, ClientConfig, EventDraft, EventType, DESCRIPTION_MAX_CHARS, SOURCE_MAX_CHARS,
    TITLE_MAX_CHARS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Title(String),
    Description(String),
    Source(String),
    Type(EventType),
}

/// The creation form. Inputs are length-capped as they are typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub source: String,
    pub event_type: EventType,
}

impl EventForm {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            source: clamp_chars(&config.default_source, SOURCE_MAX_CHARS),
            event_type: config.default_type,
        }
    }

    pub fn edit(&mut self, field: FormField) {
        match field {
            FormField::Title(value) => self.title = clamp_chars(&value, TITLE_MAX_CHARS),
            FormField::Description(value) => {
                self.description = clamp_chars(&value, DESCRIPTION_MAX_CHARS)
            }
            FormField::Source(value) => self.source = clamp_chars(&value, SOURCE_MAX_CHARS),
            FormField::Type(value) => self.event_type = value,
        }
    }

    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            source: self.source.clone(),
            event_type: self.event_type,
        }
    }

    /// Source and type survive so the next entry can be typed right away.
    pub fn reset_after_submit(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_source_and_type() {
        let mut form = EventForm::new(&ClientConfig::default());
        form.edit(FormField::Title("Order #42".into()));
        form.edit(FormField::Description("paid".into()));
        form.edit(FormField::Source("checkout".into()));
        form.edit(FormField::Type(EventType::Integration));

        form.reset_after_submit();

        assert!(form.title.is_empty());
        assert!(form.description.is_empty());
        assert_eq!(form.source, "checkout");
        assert_eq!(form.event_type, EventType::Integration);
    }

    #[test]
    fn inputs_are_capped() {
        let mut form = EventForm::new(&ClientConfig::default());
        form.edit(FormField::Title("x".repeat(250)));
        assert_eq!(form.title.chars().count(), TITLE_MAX_CHARS);
    }
}
