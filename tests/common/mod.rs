//! Scripted in-memory transport for exercising a station without hardware.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use id5001::{SerialError, Transport};

/// One scripted exchange: a canned response line, or a transport fault.
#[derive(Debug)]
pub enum Step {
    Respond(&'static str),
    Fail,
}

#[derive(Debug, Default)]
struct State {
    script: VecDeque<Step>,
    sent: Vec<String>,
    closed: bool,
}

/// Transport that answers from a script and records every frame sent.
///
/// Clones share state, so a handle kept by the test stays usable after the
/// transport moves into a station. A script that runs dry answers with
/// empty lines, the same thing a silent station produces.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Rc<RefCell<State>>,
}

impl MockTransport {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                script: script.into(),
                sent: Vec::new(),
                closed: false,
            })),
        }
    }

    /// Frames sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.state.borrow().sent.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }
}

impl Transport for MockTransport {
    fn send_and_receive(&mut self, command: &str) -> Result<String, SerialError> {
        let mut state = self.state.borrow_mut();
        state.sent.push(command.to_string());
        match state.script.pop_front() {
            Some(Step::Respond(line)) => Ok(line.to_string()),
            Some(Step::Fail) => Err(SerialError::IoError(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "scripted fault",
            ))),
            None => Ok(String::new()),
        }
    }

    fn close(&mut self) {
        self.state.borrow_mut().closed = true;
    }
}
