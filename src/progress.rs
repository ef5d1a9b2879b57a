//! A progress bar that disappears when `fancy` is off.

#[cfg(feature = "fancy")]
use indicatif::ProgressBar;

#[cfg(feature = "fancy")]
pub(crate) struct Progress(ProgressBar);

#[cfg(feature = "fancy")]
impl Progress {
    pub(crate) fn new(len: usize, verbose: bool) -> Self {
        if verbose {
            Progress(ProgressBar::new(len as u64))
        } else {
            Progress(ProgressBar::hidden())
        }
    }

    pub(crate) fn inc(&self) {
        self.0.inc(1);
    }

    pub(crate) fn finish(&self) {
        self.0.finish_and_clear();
    }
}

#[cfg(not(feature = "fancy"))]
pub(crate) struct Progress;

#[cfg(not(feature = "fancy"))]
impl Progress {
    pub(crate) fn new(_len: usize, _verbose: bool) -> Self {
        Progress
    }

    pub(crate) fn inc(&self) {}

    pub(crate) fn finish(&self) {}
}
