/// Aggregated view of run progress, useful for a "question n of N" header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: u32,
    pub answered: u32,
    /// 1-based number of the question on screen; `None` outside the quiz phase.
    pub current: Option<u32>,
    pub remaining: u32,
    pub is_complete: bool,
}
