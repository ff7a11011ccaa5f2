#![allow(dead_code)]

use std::collections::VecDeque;

use flow_fps::{
    config::KeyMappings,
    frame::{Acquired, Extent, FrameBackend, PresentStatus},
    game::state::{StateCommand, StateMachine},
    input::{Button, InputState},
    render::Scene,
};

pub const EPSILON: f32 = 1e-4;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {} but got {}",
        expected,
        actual
    );
}

pub fn assert_vec_close(actual: cgmath::Vector3<f32>, expected: [f32; 3]) {
    assert_close(actual.x, expected[0]);
    assert_close(actual.y, expected[1]);
    assert_close(actual.z, expected[2]);
}

/// Press `button` for a single frame, run `f`, then release it again.
pub fn tap<T>(input: &mut InputState, button: impl Into<Button>, f: impl FnOnce(&InputState) -> T) -> T {
    let button = button.into();
    input.press(button);
    let result = f(&*input);
    input.end_frame();
    input.release(button);
    input.end_frame();
    result
}

pub fn tap_state(
    machine: &mut StateMachine,
    input: &mut InputState,
    keys: &KeyMappings,
    button: impl Into<Button>,
) -> Option<StateCommand> {
    tap(input, button, |input| machine.handle_input(input, keys))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    Acquire,
    Record(usize),
    Submit,
    Present,
    WaitIdle,
    Recreate(Extent),
    Allocate(usize),
    RebuildPipeline,
}

/// Scripted stand-in for the GPU. Images and command buffers are plain slot
/// indices; every trait call is logged in order.
#[derive(Debug)]
pub struct MockBackend {
    pub extent: Extent,
    pub image_count: usize,
    /// Image count the swap chain reports after the next recreation.
    pub next_image_count: Option<usize>,
    /// `true` entries make the matching acquire report out of date.
    pub acquire_script: VecDeque<bool>,
    pub present_script: VecDeque<PresentStatus>,
    pub calls: Vec<Call>,
    pub allocated_slots: usize,
    next_image: usize,
}

impl MockBackend {
    pub fn new(width: u32, height: u32, image_count: usize) -> Self {
        Self {
            extent: Extent::new(width, height),
            image_count,
            next_image_count: None,
            acquire_script: VecDeque::new(),
            present_script: VecDeque::new(),
            calls: Vec::new(),
            allocated_slots: 0,
            next_image: 0,
        }
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn recreations(&self) -> usize {
        self.count(|c| matches!(c, Call::Recreate(_)))
    }

    pub fn records(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Record(slot) => Some(*slot),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl FrameBackend for MockBackend {
    type Image = usize;
    type Commands = usize;

    fn drawable_extent(&self) -> Extent {
        self.extent
    }

    fn image_count(&self) -> usize {
        self.image_count
    }

    fn acquire_image(&mut self) -> anyhow::Result<Acquired<Self::Image>> {
        self.calls.push(Call::Acquire);
        if self.acquire_script.pop_front().unwrap_or(false) {
            return Ok(Acquired::OutOfDate);
        }
        let index = self.next_image;
        self.next_image = (self.next_image + 1) % self.image_count;
        Ok(Acquired::Ready {
            image: index,
            index,
        })
    }

    fn record(&mut self, slot: usize, image: &Self::Image, _: &Scene) -> anyhow::Result<Self::Commands> {
        anyhow::ensure!(slot < self.allocated_slots, "slot {} was never allocated", slot);
        assert_eq!(slot, *image);
        self.calls.push(Call::Record(slot));
        Ok(slot)
    }

    fn submit(&mut self, _: Self::Commands) -> anyhow::Result<()> {
        self.calls.push(Call::Submit);
        Ok(())
    }

    fn present(&mut self, _: Self::Image) -> anyhow::Result<PresentStatus> {
        self.calls.push(Call::Present);
        Ok(self
            .present_script
            .pop_front()
            .unwrap_or(PresentStatus::Success))
    }

    fn wait_idle(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::WaitIdle);
        Ok(())
    }

    fn recreate_swap_chain(&mut self, extent: Extent) -> anyhow::Result<()> {
        anyhow::ensure!(!extent.is_zero(), "recreated with a zero extent");
        self.calls.push(Call::Recreate(extent));
        if let Some(count) = self.next_image_count.take() {
            self.image_count = count;
        }
        self.next_image = 0;
        Ok(())
    }

    fn allocate_command_slots(&mut self, count: usize) -> anyhow::Result<()> {
        self.calls.push(Call::Allocate(count));
        self.allocated_slots = count;
        Ok(())
    }

    fn rebuild_pipeline(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::RebuildPipeline);
        Ok(())
    }
}
