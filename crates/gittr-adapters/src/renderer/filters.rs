//! Custom Tera filters and functions.

use std::collections::HashMap;

use chrono::{
    Local,
    format::{Item, StrftimeItems},
};
use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use tera::{Function, Result, Value};

use super::clock::RenderClock;

/// Format used by `now()` when none is given.
pub const DEFAULT_NOW_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("snake_case filter expects a string"))?;
    Ok(Value::String(s.to_snake_case()))
}

pub(crate) fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("pascal_case filter expects a string"))?;
    Ok(Value::String(s.to_pascal_case()))
}

pub(crate) fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("camel_case filter expects a string"))?;
    Ok(Value::String(s.to_lower_camel_case()))
}

pub(crate) fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("kebab_case filter expects a string"))?;
    Ok(Value::String(s.to_kebab_case()))
}

/// `now(format="%Y-%m-%d", utc=true, timestamp=false)`
///
/// Reads the instant captured by the [`RenderClock`], so every pass of a
/// render sees the same time.
pub(crate) struct Now {
    clock: RenderClock,
}

impl Now {
    pub(crate) fn new(clock: RenderClock) -> Self {
        Self { clock }
    }
}

impl Function for Now {
    fn call(&self, args: &HashMap<String, Value>) -> Result<Value> {
        let instant = self.clock.instant();

        if flag(args, "timestamp", false)? {
            return Ok(Value::from(instant.timestamp()));
        }

        let format = match args.get("format") {
            None => DEFAULT_NOW_FORMAT,
            Some(v) => v
                .as_str()
                .ok_or_else(|| tera::Error::msg("now(): `format` must be a string"))?,
        };
        let items = parse_format(format)?;

        let text = if flag(args, "utc", true)? {
            instant.format_with_items(items.into_iter()).to_string()
        } else {
            instant
                .with_timezone(&Local)
                .format_with_items(items.into_iter())
                .to_string()
        };
        Ok(Value::String(text))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

fn flag(args: &HashMap<String, Value>, name: &str, default: bool) -> Result<bool> {
    match args.get(name) {
        None => Ok(default),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| tera::Error::msg(format!("now(): `{name}` must be a boolean"))),
    }
}

/// Parse a strftime format up front; chrono would otherwise fail mid-format.
fn parse_format(format: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(tera::Error::msg(format!(
            "now(): invalid format string '{format}'"
        )));
    }
    Ok(items)
}
