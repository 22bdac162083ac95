use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use log::debug;

use super::command::{Commands, ShellLine};
use super::run::{execute, render_line};
use super::split_args;
use crate::prelude::{AppError, ContactStore, NotificationEvent};

pub const MAX_TOASTS: usize = 3;
pub const TOAST_LIFETIME: Duration = Duration::from_secs(2);

struct Toast {
    event: NotificationEvent,
    shown_at: Instant,
}

/// Notifications currently on screen. Holds at most [`MAX_TOASTS`]; the
/// oldest one is dropped to make room.
pub struct ToastStack {
    toasts: VecDeque<Toast>,
    capacity: usize,
    lifetime: Duration,
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new(MAX_TOASTS, TOAST_LIFETIME)
    }
}

impl ToastStack {
    pub fn new(capacity: usize, lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::with_capacity(capacity),
            capacity,
            lifetime,
        }
    }

    /// Shows `event`, returning the toast it pushed off the stack, if any.
    pub fn push(&mut self, event: NotificationEvent, now: Instant) -> Option<NotificationEvent> {
        self.expire(now);

        let evicted = if self.toasts.len() >= self.capacity {
            self.toasts.pop_front().map(|toast| toast.event)
        } else {
            None
        };

        self.toasts.push_back(Toast {
            event,
            shown_at: now,
        });
        evicted
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn active(&mut self, now: Instant) -> Vec<&NotificationEvent> {
        self.expire(now);
        self.toasts.iter().map(|toast| &toast.event).collect()
    }

    fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|toast| now.duration_since(toast.shown_at) < lifetime);
    }
}

/// Reads commands from `input` until EOF or `exit`.
pub fn run_shell<R: BufRead>(store: &mut ContactStore, input: R) -> Result<(), AppError> {
    let toasts = Rc::new(RefCell::new(ToastStack::default()));

    let sink = Rc::clone(&toasts);
    store.subscribe(move |event| {
        if let Some(evicted) = sink.borrow_mut().push(event.clone(), Instant::now()) {
            debug!("Toast dismissed early: {}", evicted);
        }
    });

    println!("\n\n--- CONTACT BOOK ---\n");
    println!("Type 'help' for commands, 'exit' to quit.");
    prompt()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        match line {
            "" => {}
            "exit" | "quit" => break,
            _ => run_line(store, &toasts, line),
        }
        prompt()?;
    }

    println!("\nBye!");
    Ok(())
}

fn run_line(store: &mut ContactStore, toasts: &RefCell<ToastStack>, line: &str) {
    let args = match split_args(line) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let command = match ShellLine::try_parse_from(args) {
        Ok(parsed) => parsed.command,
        Err(e) => {
            // clap renders help and usage errors itself
            let _ = e.print();
            return;
        }
    };

    match command {
        Commands::Shell => eprintln!("Already in the shell"),
        Commands::Notifications => {
            let mut toasts = toasts.borrow_mut();
            let active = toasts.active(Instant::now());
            if active.is_empty() {
                println!("No notifications");
            }
            for event in active {
                println!("{}", render_line(event));
            }
        }
        command => {
            if let Err(e) = execute(store, command) {
                eprintln!("{e}");
            }
        }
    }
}

fn prompt() -> Result<(), AppError> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_at_most_three_toasts() {
        let mut stack = ToastStack::default();
        let now = Instant::now();

        for i in 1..=3 {
            assert_eq!(stack.push(NotificationEvent::success(format!("t{i}")), now), None);
        }
        let evicted = stack.push(NotificationEvent::warning("t4"), now);

        assert_eq!(evicted, Some(NotificationEvent::success("t1")));
        let messages: Vec<&str> = stack
            .active(now)
            .into_iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(messages, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn toasts_expire() {
        let mut stack = ToastStack::default();
        let start = Instant::now();

        stack.push(NotificationEvent::success("old"), start);
        stack.push(
            NotificationEvent::success("new"),
            start + Duration::from_millis(1500),
        );

        let later = start + Duration::from_millis(2500);
        let messages: Vec<&str> = stack
            .active(later)
            .into_iter()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(messages, vec!["new"]);
    }
}
