/*!
 * Shared test doubles
 * A deterministic heap and a recording view for driving the profiler
 */

#![allow(dead_code)]

use heapscope::{Address, MemOp, MemoryView, Size, SystemAllocator};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Deterministic stand-in for the native heap. Addresses bump by 16-byte
/// granules; reallocation always moves unless `realloc_in_place` is set,
/// which exercises both sides of the destroy-and-recreate contract. The
/// failure switch is shared so tests can arm a refusal after the profiler
/// has taken ownership of the heap.
pub struct FakeHeap {
    next: Address,
    pub live: HashMap<Address, Size>,
    fail_next: Rc<Cell<bool>>,
    pub realloc_in_place: bool,
}

impl FakeHeap {
    pub fn new() -> Self {
        Self {
            next: 0x1000,
            live: HashMap::new(),
            fail_next: Rc::new(Cell::new(false)),
            realloc_in_place: false,
        }
    }

    /// Shared flag: set to `true` to make the next alloc/realloc refuse.
    pub fn failure_switch(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.fail_next)
    }

    fn take(&mut self, size: Size) -> Option<Address> {
        if self.fail_next.take() {
            return None;
        }
        let address = self.next;
        self.next += ((size.max(1) + 15) / 16) * 16;
        self.live.insert(address, size);
        Some(address)
    }
}

impl SystemAllocator for FakeHeap {
    fn alloc(&mut self, size: Size) -> Option<Address> {
        self.take(size)
    }

    fn realloc(&mut self, address: Address, _old_size: Size, new_size: Size) -> Option<Address> {
        if self.fail_next.take() {
            return None;
        }
        if self.realloc_in_place && self.live.contains_key(&address) {
            self.live.insert(address, new_size);
            return Some(address);
        }
        self.live.remove(&address);
        self.take(new_size)
    }

    fn free(&mut self, address: Address, _size: Size) {
        self.live.remove(&address);
    }
}

/// Everything a view observed, shared with the test through an `Rc`.
#[derive(Default)]
pub struct ViewState {
    pub begun: Option<(Address, f32)>,
    pub ops: Vec<MemOp>,
    pub ended: bool,
}

pub struct RecordingView(pub Rc<RefCell<ViewState>>);

impl RecordingView {
    pub fn new() -> (Box<Self>, Rc<RefCell<ViewState>>) {
        let state = Rc::new(RefCell::new(ViewState::default()));
        (Box::new(Self(Rc::clone(&state))), state)
    }
}

impl MemoryView for RecordingView {
    fn begin(&mut self, base_address: Address, expected_mb: f32) {
        self.0.borrow_mut().begun = Some((base_address, expected_mb));
    }

    fn on_op(&mut self, op: &MemOp) {
        self.0.borrow_mut().ops.push(*op);
    }

    fn end(&mut self) {
        self.0.borrow_mut().ended = true;
    }
}
