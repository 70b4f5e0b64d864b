/// Converts a camelCase identifier into an env-var style name.
///
/// An underscore is inserted before every ASCII uppercase letter except a
/// leading one, then the whole string is uppercased. Acronyms get no special
/// treatment: `databaseURL` becomes `DATABASE_U_R_L`.
pub fn to_env_style_name(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, ch) in ident.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(ch);
    }

    out.to_uppercase()
}
