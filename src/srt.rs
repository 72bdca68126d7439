/// A single SRT cue, with its timestamps still in textual form.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub(crate) sequence_number: Option<usize>,
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    pub(crate) text: String,
}

#[cfg(test)]
impl Cue {
    pub fn new(start_time: &str, end_time: &str, text: &str) -> Self {
        Self {
            sequence_number: None,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            text: text.to_string(),
        }
    }
}
