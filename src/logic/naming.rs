/// Lower snake case: `"State Name"` becomes `"state_name"`.
pub fn snake_case(name: &str) -> String {
    let lowered: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();

    // Collapse multiple underscores
    let mut result = String::with_capacity(lowered.len());
    let mut last_was_underscore = false;
    for c in lowered.chars() {
        if c == '_' {
            if !last_was_underscore {
                result.push(c);
            }
            last_was_underscore = true;
        } else {
            result.push(c);
            last_was_underscore = false;
        }
    }

    result.trim_matches('_').to_owned()
}

/// Name of the integer column produced by encoding `column`.
pub fn encoded_column_name(column: &str) -> String {
    format!("{}_encoded", snake_case(column))
}
