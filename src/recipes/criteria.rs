use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::dto::SearchForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Vegetarian,
    Vegan,
}

impl Diet {
    pub fn as_str(self) -> &'static str {
        match self {
            Diet::Vegetarian => "vegetarian",
            Diet::Vegan => "vegan",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "vegetarian" => Some(Diet::Vegetarian),
            "vegan" => Some(Diet::Vegan),
            _ => None,
        }
    }
}

/// Three-level label derived purely from preparation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Mid,
    Hard,
}

impl Difficulty {
    pub fn from_minutes(minutes: u32) -> Self {
        if minutes < 30 {
            Difficulty::Easy
        } else if minutes < 60 {
            Difficulty::Mid
        } else {
            Difficulty::Hard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Mid => "Mid",
            Difficulty::Hard => "Hard",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "mid" => Some(Difficulty::Mid),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub ingredients: Option<String>,
    pub diet: Option<Diet>,
    pub max_calories: Option<u32>,
    pub max_time_minutes: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

impl SearchCriteria {
    /// Normalizes raw form fields. Unparseable values become absent,
    /// never an error.
    pub fn from_form(form: &SearchForm) -> Self {
        Self {
            ingredients: non_empty(form.ingredients.trim()),
            diet: Diet::parse(&form.diet),
            max_calories: parse_count(&form.max_calories),
            max_time_minutes: parse_count(&form.max_time),
            difficulty: Difficulty::parse(&form.difficulty),
        }
    }
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Strict non-negative integer literal; anything else is absent.
fn parse_count(raw: &str) -> Option<u32> {
    lazy_static! {
        static ref DIGITS_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
    }
    let raw = raw.trim();
    if DIGITS_RE.is_match(raw) {
        raw.parse().ok()
    } else {
        None
    }
}
