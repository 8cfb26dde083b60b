// Language preference and derived text direction

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Arabic,
    English,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Rtl,
    Ltr,
}

impl Language {
    /// Storage form, also the value of the page `lang` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::English => "en",
        }
    }

    /// Accepts only the two persisted forms; anything else is ignored
    /// so a corrupted preference falls back to the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ar" => Some(Language::Arabic),
            "en" => Some(Language::English),
            _ => None,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Language::Arabic => Direction::Rtl,
            Language::English => Direction::Ltr,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::Arabic => Language::English,
            Language::English => Language::Arabic,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Arabic
    }
}
