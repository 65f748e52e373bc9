use super::ProblemDocument;
use crate::day::Day;

const APPROACH_AND_STATS: &str = "## Approach

### Part 1
- [ ] Parse input
- [ ] Process data
- [ ] Calculate result

### Part 2
- [ ] Extend part 1 solution
- [ ] Handle new requirements
- [ ] Calculate result

## Solution Stats

### Part 1
- Time: XX ms
- Memory: XX MB

### Part 2
- Time: XX ms
- Memory: XX MB
";

/// Render a problem as the per-day notes document.
pub fn render(doc: &ProblemDocument) -> String {
    let examples = doc
        .examples
        .iter()
        .enumerate()
        .map(|(i, example)| format!("\nExample {}:\n```\n{}\n```\n", i + 1, example))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# {}\n\n{}\n\n## Notes\n\n### Example Inputs\n{}\n\n{}",
        doc.title, doc.body, examples, APPROACH_AND_STATS
    )
}

/// Stand-in document used when the problem page can't be fetched.
pub fn fallback_document(day: Day) -> ProblemDocument {
    ProblemDocument {
        title: format!("Day {day}"),
        body: "_Problem statement unavailable. Paste it here, or run `aoc fetch` later._"
            .to_string(),
        examples: Vec::new(),
    }
}
