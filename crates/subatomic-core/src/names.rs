use rand::distributions::Alphanumeric;
use rand::Rng;

const SUFFIX_LEN: usize = 7;

/// Generate a unique key from a base name by appending a random alphanumeric
/// suffix. Two task instances of the same concrete type added to one runner
/// get distinct keys in the task list this way.
pub fn unique_name(base: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{base}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_base_yields_distinct_names() {
        let a = unique_name("ConfigureAccess");
        let b = unique_name("ConfigureAccess");
        assert_ne!(a, b);
        assert!(a.starts_with("ConfigureAccess-"));
        assert!(b.starts_with("ConfigureAccess-"));
    }

    #[test]
    fn suffix_has_fixed_length() {
        let name = unique_name("x");
        assert_eq!(name.len(), 1 + 1 + SUFFIX_LEN);
    }
}
