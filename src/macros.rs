/// Compile a built-in pattern once and hand out a `&'static Regex`.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
            regex::Regex::new($pat).expect(concat!("built-in pattern does not compile: ", $pat))
        });
        &*RE
    }};
}
