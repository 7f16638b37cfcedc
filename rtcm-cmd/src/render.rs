use handlebars::{handlebars_helper, Handlebars};

fn json_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.to_owned(),
        serde_json::Value::Null => String::new(),
        _ => v.to_string(),
    }
}

fn pad(v: &serde_json::Value, width: u64, left: bool) -> String {
    let v = json_to_string(v);
    let width = usize::try_from(width).unwrap_or_default();
    if left {
        format!("{v:>width$}")
    } else {
        format!("{v:<width$}")
    }
}

/// Handlebars registry with the helpers shared by all text templates.
///
/// Output is plain text, so HTML escaping is disabled.
pub fn setup_handlebars() -> Handlebars<'static> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);

    handlebars_helper!(left_pad: |num: u64, v: Json| pad(v, num, true));
    hb.register_helper("lpad", Box::new(left_pad));

    handlebars_helper!(right_pad: |num: u64, v: Json| pad(v, num, false));
    hb.register_helper("rpad", Box::new(right_pad));

    handlebars_helper!(fixed: |digits: u64, v: f64| {
        format!("{:.*}", usize::try_from(digits).unwrap_or_default(), v)
    });
    hb.register_helper("fixed", Box::new(fixed));

    hb
}
