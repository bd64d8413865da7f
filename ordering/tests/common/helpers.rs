//! Test helpers and builder patterns for ordering tests

use ordering::traits::MockPresenter;
use ordering::*;
use shared::{CallToOrder, Notice, NoticeLevel, OrderSnapshot, SessionId};
use std::sync::{Arc, Mutex};

use super::fixtures::TestFixtures;

/// Presenter that keeps everything it was asked to show
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    pub snapshots: Arc<Mutex<Vec<OrderSnapshot>>>,
    pub notices: Arc<Mutex<Vec<Notice>>>,
    pub calls: Arc<Mutex<Vec<CallToOrder>>>,
    pub menus: Arc<Mutex<usize>>,
}

impl RecordingPresenter {
    pub fn last_snapshot(&self) -> Option<OrderSnapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.level == NoticeLevel::Error)
            .collect()
    }

    pub fn render_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, snapshot: &OrderSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }

    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn show_menu(&self, _catalog: &Catalog) {
        *self.menus.lock().unwrap() += 1;
    }

    fn show_call_to_order(&self, call: &CallToOrder) {
        self.calls.lock().unwrap().push(call.clone());
    }
}

/// Builder for desks over the fixture catalog with a mock presenter
pub struct DeskBuilder {
    config: DeskConfig,
    presenter: MockPresenter,
}

impl DeskBuilder {
    /// Mock presenter that accepts any call
    pub fn new() -> Self {
        let mut presenter = MockPresenter::new();
        presenter.expect_render().returning(|_| ()).times(0..);
        presenter.expect_notify().returning(|_| ()).times(0..);
        presenter.expect_show_menu().returning(|_| ()).times(0..);
        presenter.expect_show_call_to_order().returning(|_| ()).times(0..);
        Self { config: DeskConfig::default(), presenter }
    }

    pub fn with_policy(mut self, policy: CombinationPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Replace the presenter with one configured by `setup`
    pub fn with_presenter<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockPresenter),
    {
        let mut presenter = MockPresenter::new();
        setup(&mut presenter);
        self.presenter = presenter;
        self
    }

    pub fn build(self) -> OrderDesk<MockPresenter> {
        OrderDesk::new(TestFixtures::catalog(), self.config, self.presenter)
    }
}

impl Default for DeskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Common test helper functions
pub struct TestHelpers;

impl TestHelpers {
    pub fn session() -> OrderSession {
        OrderSession::with_id(
            SessionId::from_string(TestFixtures::SESSION).unwrap(),
            TestFixtures::catalog(),
            CombinationPolicy::default(),
        )
    }

    pub fn recording_desk() -> (OrderDesk<RecordingPresenter>, RecordingPresenter) {
        let presenter = RecordingPresenter::default();
        let desk = OrderDesk::new(TestFixtures::catalog(), DeskConfig::default(), presenter.clone());
        (desk, presenter)
    }

    /// Feed a script to the desk, collecting one result per non-blank line
    pub fn run_script<P: Presenter>(
        desk: &mut OrderDesk<P>,
        script: &str,
    ) -> Vec<OrderingResult<OrderEvent>> {
        script
            .lines()
            .filter_map(|line| desk.handle_line(line).transpose())
            .collect()
    }

    /// Recompute the total from the lines, independent of `total()`
    pub fn recomputed_total(session: &OrderSession) -> shared::Price {
        session.lines().map(|line| line.unit_price * line.quantity).sum()
    }

    /// Assert the session's cart and pending state
    pub fn assert_session(session: &OrderSession, line_count: u32, total: &str, pending: usize) {
        assert_eq!(session.line_count(), line_count, "line count");
        assert_eq!(session.total(), TestFixtures::dt(total), "total");
        assert_eq!(session.pending_quarters(), pending, "pending quarters");
    }
}
