// Tue Jan 13 2026 - Alex

use colored::*;

const WIDTH: usize = 56;

/// Startup banner for the CLI. Suppressed by `--quiet`.
pub struct Banner {
    lines: Vec<(String, Tone)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Title,
    Plain,
    Version,
}

impl Banner {
    pub fn new(title: &str) -> Self {
        Self {
            lines: vec![(title.to_string(), Tone::Title)],
        }
    }

    pub fn line(mut self, text: &str) -> Self {
        self.lines.push((text.to_string(), Tone::Plain));
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.lines.push((format!("v{}", version), Tone::Version));
        self
    }

    pub fn render(&self) -> String {
        let inner = self
            .lines
            .iter()
            .map(|(text, _)| text.chars().count())
            .max()
            .unwrap_or(0)
            .max(WIDTH);
        let rule = "─".repeat(inner + 2);

        let mut out = vec![format!("┌{}┐", rule)];
        for (text, tone) in &self.lines {
            let padded = format!("{:^width$}", text, width = inner);
            let shown = match tone {
                Tone::Title => padded.cyan().bold(),
                Tone::Plain => padded.normal(),
                Tone::Version => padded.green(),
            };
            out.push(format!("│ {} │", shown));
        }
        out.push(format!("└{}┘", rule));
        out.join("\n")
    }

    pub fn print_default() {
        println!("{}", Banner::default().render());
    }
}

impl Default for Banner {
    fn default() -> Self {
        Banner::new("D3D8 Structure Scanner")
            .line("Heuristic Direct3D 8 layout recognition")
            .version(env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_boxed_and_aligned() {
        colored::control::set_override(false);
        let rendered = Banner::new("Scan").line("x").render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with('┌') && lines[3].starts_with('└'));
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(lines[1].contains("Scan"));
    }
}
