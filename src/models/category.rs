use rust_decimal::Decimal;

/// Display color tokens offered when creating a category, as `(token, label)`.
pub const COLOR_OPTIONS: &[(&str, &str)] = &[
    ("bg-chart-1", "Teal"),
    ("bg-chart-2", "Green"),
    ("bg-chart-3", "Blue"),
    ("bg-chart-4", "Amber"),
    ("bg-chart-5", "Purple"),
    ("bg-positive", "Mint"),
    ("bg-primary", "Primary"),
];

pub const DEFAULT_COLOR: &str = "bg-chart-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub monthly_budget: Decimal,
    /// Opaque display token; analytics never look at it.
    pub color: String,
}

impl Category {
    pub fn new(name: String, description: String, monthly_budget: Decimal, color: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description,
            monthly_budget,
            color,
        }
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// Resolve user input that may be either an id or a name.
    pub fn lookup<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
        Self::find_by_id(categories, key).or_else(|| Self::find_by_name(categories, key))
    }

    /// Human label for the color token, falling back to the token itself.
    pub fn color_label(&self) -> &str {
        COLOR_OPTIONS
            .iter()
            .find(|(token, _)| *token == self.color)
            .map(|(_, label)| *label)
            .unwrap_or(self.color.as_str())
    }
}

/// Map a color label ("Teal") or token ("bg-chart-1") to its token.
/// Unknown input is passed through unchanged.
pub fn resolve_color(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    COLOR_OPTIONS
        .iter()
        .find(|(token, label)| *token == lower || label.to_lowercase() == lower)
        .map(|(token, _)| token.to_string())
        .unwrap_or_else(|| input.trim().to_string())
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
