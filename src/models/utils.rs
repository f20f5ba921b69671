/// Type name of `T` without its module path or generic arguments, the way a
/// class name reads (`my_lib::cluster::KMeans<f64>` becomes `KMeans`).
pub fn short_type_name<T: ?Sized>() -> String {
    strip_type_path(std::any::type_name::<T>())
}

/// Drop module paths from a `type_name` string. Named types also lose their
/// generic arguments; tuples and arrays keep their shape with each element
/// shortened (`(a::B, [c::D; 2])` becomes `(B, [D; 2])`).
fn strip_type_path(full: &str) -> String {
    let full = full.trim();
    if full.starts_with('(') || full.starts_with('[') {
        return strip_each_path(full);
    }
    let base = full.split('<').next().unwrap_or(full);
    last_segment(base).to_string()
}

fn strip_each_path(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            out.push_str(last_segment(&path));
            path.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&path));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
