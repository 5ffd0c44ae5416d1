//! Attach, access and detach a knob end to end, with failures injected into
//! the attribute host at every creation step.

use std::cell::RefCell;
use std::rc::Rc;

use motorknob_driver::{
    Attribute, AttributeHost, AttributeTree, ContainerId, HostError, KnobConfig, KnobError,
    KnobTree, MotorKnob, RegisterBus, Registry, RegistryState, ATTRIBUTES,
};

const PATHS: [&str; 4] = [
    "motorknob/profile/detents",
    "motorknob/profile/start_position",
    "motorknob/profile/end_position",
    "motorknob/position",
];

/// Bus that records every transaction and answers reads from a queue.
#[derive(Clone, Default)]
struct ScriptedBus {
    log: Rc<RefCell<Vec<(char, u8, u16)>>>,
    replies: Rc<RefCell<Vec<u16>>>,
}

impl RegisterBus for ScriptedBus {
    type Error = i32;

    fn read_word(&mut self, register: u8) -> Result<u16, i32> {
        let value = self.replies.borrow_mut().pop().ok_or(-110)?;
        self.log.borrow_mut().push(('r', register, value));
        Ok(value)
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<(), i32> {
        self.log.borrow_mut().push(('w', register, value));
        Ok(())
    }
}

/// Host that fails the `fail_at`-th creation call and logs every call.
struct FlakyHost {
    inner: AttributeTree<4, 8>,
    fail_at: Option<usize>,
    creations: usize,
    calls: Vec<String>,
}

impl FlakyHost {
    fn new(fail_at: Option<usize>) -> Self {
        Self {
            inner: AttributeTree::new(),
            fail_at,
            creations: 0,
            calls: Vec::new(),
        }
    }

    fn should_fail(&mut self) -> bool {
        let step = self.creations;
        self.creations += 1;
        self.fail_at == Some(step)
    }
}

impl AttributeHost for FlakyHost {
    type Container = ContainerId;
    type Error = HostError;

    fn create_container(
        &mut self,
        name: &'static str,
        parent: Option<ContainerId>,
    ) -> Result<ContainerId, HostError> {
        if self.should_fail() {
            return Err(HostError::Full);
        }
        self.calls.push(format!("mkdir {name}"));
        self.inner.create_container(name, parent)
    }

    fn release_container(&mut self, container: ContainerId) {
        self.calls.push(format!("rmdir {container:?}"));
        self.inner.release_container(container);
    }

    fn create_file(
        &mut self,
        container: ContainerId,
        attribute: &'static Attribute,
    ) -> Result<(), HostError> {
        if self.should_fail() {
            return Err(HostError::Full);
        }
        self.calls.push(format!("create {}", attribute.name));
        self.inner.create_file(container, attribute)
    }

    fn remove_file(&mut self, container: ContainerId, attribute: &'static Attribute) {
        self.calls.push(format!("remove {}", attribute.name));
        self.inner.remove_file(container, attribute);
    }

    fn lookup(&self, path: &str) -> Option<&'static Attribute> {
        self.inner.lookup(path)
    }
}

fn visible(host: &impl AttributeHost) -> usize {
    PATHS.iter().filter(|p| host.lookup(p).is_some()).count()
}

// ── End to end ───────────────────────────────────────────────────────

#[test]
fn write_start_position_then_read_position() {
    let bus = ScriptedBus::default();
    bus.replies.borrow_mut().push(0x1234);
    let log = Rc::clone(&bus.log);

    let mut tree = KnobTree::new();
    let mut knob = MotorKnob::probe(bus, &mut tree, &KnobConfig::default()).unwrap();

    assert_eq!(
        knob.write(&tree, "motorknob/profile/start_position", &[0x01, 0x02]),
        Ok(2)
    );

    let mut out = [0u8; 2];
    assert_eq!(knob.read(&tree, "motorknob/position", &mut out), Ok(2));
    assert_eq!(out, [0x34, 0x12]);

    assert_eq!(*log.borrow(), vec![('w', 0x80, 0x0102), ('r', 0x03, 0x1234)]);

    knob.remove(&mut tree);
    assert!(tree.is_empty());
}

#[test]
fn transport_errors_reach_the_caller_unretried() {
    let bus = ScriptedBus::default();
    let log = Rc::clone(&bus.log);

    let mut tree = KnobTree::new();
    let mut knob = MotorKnob::probe(bus, &mut tree, &KnobConfig::default()).unwrap();

    let mut out = [0u8; 2];
    assert_eq!(
        knob.read(&tree, "motorknob/profile/detents", &mut out),
        Err(KnobError::Bus(-110))
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn undersized_write_issues_no_transaction() {
    let bus = ScriptedBus::default();
    let log = Rc::clone(&bus.log);

    let mut tree = KnobTree::new();
    let mut knob = MotorKnob::probe(bus, &mut tree, &KnobConfig::default()).unwrap();

    assert_eq!(
        knob.write(&tree, "motorknob/profile/detents", &[0x07]),
        Err(KnobError::InvalidArgument)
    );
    assert!(log.borrow().is_empty());
}

// ── Publish rollback ─────────────────────────────────────────────────

#[test]
fn publish_is_all_or_nothing_at_every_step() {
    // Two containers, then four files.
    for fail_at in 0..6 {
        let mut host = FlakyHost::new(Some(fail_at));
        let result = MotorKnob::probe(ScriptedBus::default(), &mut host, &KnobConfig::default());

        assert!(
            matches!(result, Err(KnobError::ResourceExhausted)),
            "step {fail_at}"
        );
        assert_eq!(visible(&host), 0, "step {fail_at}");
        assert!(host.inner.is_empty(), "step {fail_at}");
    }
}

#[test]
fn rollback_runs_in_reverse_order() {
    // Fail on `position`, the last file.
    let mut host = FlakyHost::new(Some(5));
    let mut registry = Registry::new("motorknob");
    let result: Result<(), KnobError<()>> = registry.publish(&mut host);
    assert_eq!(result, Err(KnobError::ResourceExhausted));
    assert_eq!(registry.state(), RegistryState::Uninitialized);

    assert_eq!(
        host.calls,
        [
            "mkdir motorknob",
            "mkdir profile",
            "create detents",
            "create start_position",
            "create end_position",
            "remove end_position",
            "remove start_position",
            "remove detents",
            "rmdir ContainerId(1)",
            "rmdir ContainerId(0)",
        ]
    );
}

// ── Teardown ─────────────────────────────────────────────────────────

#[test]
fn teardown_removes_in_table_order_then_child_then_root() {
    let mut host = FlakyHost::new(None);
    let mut registry = Registry::new("motorknob");
    let result: Result<(), KnobError<()>> = registry.publish(&mut host);
    assert!(result.is_ok());
    assert_eq!(visible(&host), 4);

    host.calls.clear();
    registry.teardown(&mut host);

    let mut expected: Vec<String> = ATTRIBUTES
        .iter()
        .map(|a| format!("remove {}", a.name))
        .collect();
    expected.push("rmdir ContainerId(1)".into());
    expected.push("rmdir ContainerId(0)".into());
    assert_eq!(host.calls, expected);
    assert!(host.inner.is_empty());
}

#[test]
fn teardown_is_idempotent_after_any_outcome() {
    for fail_at in [None, Some(0), Some(1), Some(3)] {
        let mut host = FlakyHost::new(fail_at);
        let mut registry = Registry::new("motorknob");
        let _: Result<(), KnobError<()>> = registry.publish(&mut host);

        registry.teardown(&mut host);
        registry.teardown(&mut host);

        assert_eq!(visible(&host), 0);
        assert!(host.inner.is_empty());
        assert_eq!(registry.state(), RegistryState::TornDown);
    }
}
