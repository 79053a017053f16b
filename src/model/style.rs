//! Effective style produced by merging named and inline style entries.

use std::collections::BTreeMap;

use super::value::DataValue;

/// Flat `field -> value` table as it appears on the wire.
pub type StyleFields = BTreeMap<String, DataValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "regular" => Some(Self::Normal),
            "medium" => Some(Self::Medium),
            "semibold" => Some(Self::Semibold),
            "bold" => Some(Self::Bold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::Semibold => "semibold",
            Self::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    None,
    Low,
    Medium,
    High,
}

impl Emphasis {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Resolved style for one component.
///
/// Recognized fields are typed; anything else, including a recognized field
/// whose value has the wrong shape, is carried in `extra` for the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub font_size: Option<f64>,
    pub spacing: Option<f64>,
    pub padding: Option<f64>,
    pub corner_radius: Option<f64>,
    pub opacity: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub emphasis: Option<Emphasis>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub extra: StyleFields,
}

impl Style {
    /// Overlay `fields` onto this style, field by field.
    pub fn apply(&mut self, fields: &StyleFields) {
        for (name, value) in fields {
            self.apply_field(name, value);
        }
    }

    fn apply_field(&mut self, name: &str, value: &DataValue) {
        let recognized = match name {
            "fontSize" => set(&mut self.font_size, value.as_f64()),
            "spacing" => set(&mut self.spacing, value.as_f64()),
            "padding" => set(&mut self.padding, value.as_f64()),
            "cornerRadius" => set(&mut self.corner_radius, value.as_f64()),
            "opacity" => set(&mut self.opacity, value.as_f64()),
            "fontWeight" => set(&mut self.font_weight, value.as_str().and_then(FontWeight::parse)),
            "emphasis" => set(&mut self.emphasis, value.as_str().and_then(Emphasis::parse)),
            "color" => set(&mut self.color, value.as_str().map(str::to_string)),
            "backgroundColor" => {
                set(&mut self.background_color, value.as_str().map(str::to_string))
            }
            _ => false,
        };

        if recognized {
            self.extra.remove(name);
        } else {
            self.extra.insert(name.to_string(), value.clone());
        }
    }

    /// Flatten back into wire field names.
    pub fn to_fields(&self) -> StyleFields {
        let mut fields = self.extra.clone();
        let numbers = [
            ("fontSize", self.font_size),
            ("spacing", self.spacing),
            ("padding", self.padding),
            ("cornerRadius", self.corner_radius),
            ("opacity", self.opacity),
        ];
        for (name, value) in numbers {
            if let Some(n) = value {
                fields.insert(name.to_string(), DataValue::Number(n));
            }
        }
        if let Some(weight) = self.font_weight {
            fields.insert("fontWeight".to_string(), weight.as_str().into());
        }
        if let Some(emphasis) = self.emphasis {
            fields.insert("emphasis".to_string(), emphasis.as_str().into());
        }
        if let Some(color) = &self.color {
            fields.insert("color".to_string(), color.as_str().into());
        }
        if let Some(color) = &self.background_color {
            fields.insert("backgroundColor".to_string(), color.as_str().into());
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.to_fields().is_empty()
    }
}

/// Store a parsed value; `false` means the value did not parse and the slot
/// was cleared so the raw value in `extra` takes its place.
fn set<T>(slot: &mut Option<T>, parsed: Option<T>) -> bool {
    let recognized = parsed.is_some();
    *slot = parsed;
    recognized
}
