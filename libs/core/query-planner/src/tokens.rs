/// Splits `field:modifier,field:modifier` into trimmed `(field, modifier)` pairs.
///
/// Empty tokens and tokens with an empty field name are skipped.
pub(crate) fn field_modifiers(raw: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    raw.split(',').filter_map(|token| {
        let token = token.trim();
        let (field, modifier) = match token.split_once(':') {
            Some((field, modifier)) => (field.trim(), Some(modifier.trim())),
            None => (token, None),
        };
        (!field.is_empty()).then_some((field, modifier))
    })
}
