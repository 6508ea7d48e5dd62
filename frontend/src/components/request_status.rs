/// In-flight bookkeeping for the current upload.
///
/// Every upload bumps `seq`; replies carrying an older sequence number belong
/// to a replaced upload and leave the status untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RequestStatus {
    pub seq: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    /// Starts a new request and returns its sequence number.
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        self.seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    /// A reply for the current request clears both the spinner and any error.
    pub fn succeed(&mut self, seq: u64) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.loading = false;
        self.error = None;
        true
    }

    pub fn fail(&mut self, seq: u64, message: String) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.loading = false;
        self.error = Some(message);
        true
    }

    /// Local validation messages; an upload already in flight keeps going.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}
