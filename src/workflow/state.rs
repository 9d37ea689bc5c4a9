use aadhaar_verify_common::OperationResult;

/// 送信ごとの連番
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// 1ワークフローの状態（Idle → InFlight → Succeeded/Failed）
///
/// 最後に発行したチケットのレスポンスだけを反映し、古いレスポンスは捨てる。
#[derive(Debug)]
pub struct WorkflowState<T> {
    in_flight: bool,
    result: Option<OperationResult<T>>,
    latest: u64,
}

impl<T> Default for WorkflowState<T> {
    fn default() -> Self {
        Self {
            in_flight: false,
            result: None,
            latest: 0,
        }
    }
}

impl<T> WorkflowState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信開始。前回の結果はレスポンスが来るまで残す
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.in_flight = true;
        Ticket(self.latest)
    }

    /// レスポンスを反映（最新のチケットなら true）
    pub fn settle(&mut self, ticket: Ticket, outcome: OperationResult<T>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "stale response discarded");
            return false;
        }
        self.result = Some(outcome);
        self.in_flight = false;
        true
    }

    /// 通信前の検証エラーなどをそのまま結果にする
    ///
    /// これも新しい送信なので、送信中のレスポンスは届いても捨てられる。
    pub fn set_local(&mut self, outcome: OperationResult<T>) {
        self.latest += 1;
        self.in_flight = false;
        self.result = Some(outcome);
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }

    /// Idle に戻す。送信中のレスポンスは届いても捨てられる
    pub fn reset(&mut self) {
        self.latest += 1;
        self.in_flight = false;
        self.result = None;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&OperationResult<T>> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_settle() {
        let mut state: WorkflowState<u32> = WorkflowState::new();
        assert!(!state.in_flight());

        let ticket = state.begin();
        assert!(state.in_flight());

        assert!(state.settle(ticket, OperationResult::Success(1)));
        assert!(!state.in_flight());
        assert_eq!(state.result(), Some(&OperationResult::Success(1)));
    }

    #[test]
    fn test_previous_result_visible_while_resubmitting() {
        let mut state: WorkflowState<u32> = WorkflowState::new();
        let first = state.begin();
        state.settle(first, OperationResult::Success(1));

        let _second = state.begin();
        assert!(state.in_flight());
        assert_eq!(state.result(), Some(&OperationResult::Success(1)));
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state: WorkflowState<u32> = WorkflowState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(state.settle(second, OperationResult::Success(2)));
        assert!(!state.settle(first, OperationResult::Success(1)));
        assert_eq!(state.result(), Some(&OperationResult::Success(2)));

        // 新しい方がまだ返っていなければ送信中のまま
        let third = state.begin();
        let fourth = state.begin();
        assert!(!state.settle(third, OperationResult::Failure("late".into())));
        assert!(state.in_flight());
        assert!(state.settle(fourth, OperationResult::Success(4)));
        assert!(!state.in_flight());
    }

    #[test]
    fn test_reset_invalidates_outstanding() {
        let mut state: WorkflowState<u32> = WorkflowState::new();
        let ticket = state.begin();
        state.reset();

        assert!(!state.in_flight());
        assert!(!state.settle(ticket, OperationResult::Success(1)));
        assert!(state.result().is_none());
    }

    #[test]
    fn test_set_local_supersedes_outstanding() {
        let mut state: WorkflowState<u32> = WorkflowState::new();
        let ticket = state.begin();
        state.set_local(OperationResult::Failure("Enter exactly 12 digits".into()));

        assert!(!state.in_flight());
        assert!(!state.settle(ticket, OperationResult::Success(1)));
        assert_eq!(state.result().and_then(OperationResult::failure), Some("Enter exactly 12 digits"));
    }

    #[test]
    fn test_set_local() {
        let mut state: WorkflowState<u32> = WorkflowState::new();
        state.set_local(OperationResult::Failure("Enter exactly 12 digits".into()));
        assert!(state.result().unwrap().is_failure());
        assert!(!state.in_flight());

        state.clear_result();
        assert!(state.result().is_none());
    }
}
