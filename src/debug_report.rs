use deflex::{ExtractionReport, SentenceSummary};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, report: &ExtractionReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Extracting: {} bytes", input.len()), ansi::CYAN))
    );

    println!("\n{}", palette.paint("━━━ Sentences ━━━", ansi::GRAY));
    for (idx, sentence) in report.details.sentences.iter().enumerate() {
        print_sentence(idx, input, sentence, &palette);
    }

    println!("\n{}", palette.paint("━━━ Definitions ━━━", ansi::GRAY));
    if report.definitions.is_empty() {
        println!("{}", palette.dim("  No definitions found"));
        println!("\n{}", palette.dim("  Tip: RUST_LOG=deflex=debug shows cue scans and filter drops"));
    } else {
        print_definitions(report, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Segmentation: {}  │  Duplicates: {}",
        palette.paint(format!("{:?}", report.details.total), ansi::GREEN),
        palette.paint(format!("{:?}", report.details.segmentation), ansi::CYAN),
        palette.dim(report.details.duplicates.to_string()),
    );
    println!();
}

fn print_sentence(idx: usize, input: &str, sentence: &SentenceSummary, palette: &ansi::Palette) {
    let cues = if sentence.cues.is_empty() { "-".to_string() } else { sentence.cues.join(",") };
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.paint(format!("{}..{}", sentence.start, sentence.end), ansi::YELLOW),
        palette.dim(preview(input.get(sentence.start..sentence.end).unwrap_or(""))),
        palette.dim(format!("({:?})", sentence.duration)),
    );
    println!(
        "      {} {}  {} {}  {} {}",
        palette.dim("cues:"),
        palette.paint(cues, ansi::BLUE),
        palette.dim("│ considered:"),
        palette.paint(sentence.considered.to_string(), ansi::CYAN),
        palette.dim("│ kept:"),
        if sentence.kept > 0 {
            palette.paint(format!("✓ {}", sentence.kept), ansi::GREEN)
        } else {
            palette.dim("✗ 0")
        }
    );
    for dropped in &sentence.dropped {
        println!(
            "      {} {} {} {}",
            palette.paint("dropped", ansi::RED),
            palette.bold(&dropped.term),
            palette.dim(format!("{} │", dropped.kind.name())),
            palette.paint(dropped.rule.name(), ansi::YELLOW),
        );
    }
}

fn print_definitions(report: &ExtractionReport, palette: &ansi::Palette) {
    for (idx, def) in report.definitions.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&def.term, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", def.start, def.end), ansi::YELLOW),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("kind:"),
            palette.paint(def.kind.name(), ansi::BLUE),
            palette.dim("│ source:"),
            palette.paint(preview(&def.source), ansi::CYAN)
        );
        if !def.aliases.is_empty() {
            println!("      {} {}", palette.dim("aliases:"), palette.paint(def.aliases.join(", "), ansi::GREEN));
        }
    }
}

/// Single-line preview, cut at 80 chars.
fn preview(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > 80 { format!("{}…", flat.chars().take(80).collect::<String>()) } else { flat }
}
