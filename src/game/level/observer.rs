/// Something that wants to hear when a level is won or lost.
///
/// Notifications are repeated on every recheck for as long as the condition holds, so both
/// callbacks must be safe to receive many times. Typically the observer stops the level.
///
/// Callbacks that follow a move run inside the level's move section: they may query the level
/// and call `stop`, but must not call `move_unit` on the same level.
pub trait LevelObserver: Send + Sync {
    fn level_won(&self);

    fn level_lost(&self);
}
