/// A typed command line split on whitespace, remembering where each word
/// starts so the unsplit remainder can be recovered.
pub struct CommandLine<'a> {
    line: &'a str,
    words: Vec<(usize, &'a str)>,
}

impl<'a> CommandLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut words = Vec::new();
        let mut start = None;
        for (i, ch) in line.char_indices() {
            match (ch.is_whitespace(), start) {
                (false, None) => start = Some(i),
                (true, Some(s)) => {
                    words.push((s, &line[s..i]));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            words.push((s, &line[s..]));
        }
        Self { line, words }
    }

    /// The first `n` words joined by single spaces, with a trailing space.
    pub fn start(&self, n: usize) -> String {
        let head: Vec<&str> = self.words.iter().take(n).map(|(_, w)| *w).collect();
        format!("{} ", head.join(" "))
    }

    /// Everything from the `n`th word onwards, untouched.
    pub fn rest(&self, n: usize) -> &'a str {
        match self.words.get(n) {
            Some((offset, _)) => &self.line[*offset..],
            None => "",
        }
    }
}
