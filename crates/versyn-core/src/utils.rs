//! Name conversions between grammar rule names and syntax kind names.

/// Convert snake_case to PascalCase.
///
/// Leading underscores (hidden rules) are dropped. Input that already starts
/// uppercase with no separators is returned unchanged.
///
/// # Examples
/// ```
/// use versyn_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("function_item"), "FunctionItem");
/// assert_eq!(to_pascal_case("_expression"), "Expression");
/// assert_eq!(to_pascal_case("FunctionItem"), "FunctionItem");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let has_separator = s.contains('_');
    let starts_uppercase = s.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if starts_uppercase && !has_separator {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}

/// Convert PascalCase to snake_case.
///
/// # Examples
/// ```
/// use versyn_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("FunctionItem"), "function_item");
/// assert_eq!(to_snake_case("CompoundAssignmentExpr"), "compound_assignment_expr");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Hidden rules start with `_` and never produce their own node.
pub fn is_hidden_rule(name: &str) -> bool {
    name.starts_with('_')
}
