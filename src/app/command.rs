/// Everything the user can ask the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TogglePlay,
    Previous,
    Next,
    ToggleRepeat,
    /// Drag-seek started on the progress bar, at this fraction.
    SeekPress(f64),
    SeekMove(f64),
    SeekRelease,
    /// Scrub by a number of seconds, negative to go back.
    SeekBy(i64),
    SetVolume(i32),
    VolumeBy(i32),
    /// A file or directory path typed into the add-files prompt.
    Upload(String),
    Select(usize),
    ToggleSaved(usize),
    /// Ask for confirmation before removing.
    RequestRemove(usize),
    Remove(usize),
    CancelRemove,
    CursorUp,
    CursorDown,
    OpenPrompt,
    PromptInput(char),
    PromptBackspace,
    CancelPrompt,
    DismissNotice,
    Quit,
}

/// Which surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode<'a> {
    Normal,
    /// The add-files prompt, with what has been typed so far.
    Prompt(&'a str),
    /// Waiting for the user to confirm removing this index.
    Confirm(usize),
    /// A blocking notice is shown.
    Notice,
}
