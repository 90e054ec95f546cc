/*!

Global control over verbose messaging.

Messages are sent on a `Channel` together with a verbosity level. A message is only emitted if the global verbosity
is at least the message's level. Level 0 is off. Level 1 is "normal" enabled. Level 4 gives dispatch progress. Level
5 gives matching and parsing progress. Level n includes all messages in levels m < n.

The initial verbosity is read once from the `ADTMATCH_VERBOSITY` environment variable and defaults to 1.
`set_verbosity` overrides it.

*/

use std::{
  io::{Stdout, stdout, Write},
  sync::{
    Mutex,
    atomic::{AtomicI32, Ordering}
  }
};

use lazy_static::lazy_static;
use strum_macros::{Display, IntoStaticStr};

pub const VERBOSITY_VARIABLE: &str = "ADTMATCH_VERBOSITY";
const DEFAULT_VERBOSITY: i32 = 1;
// Sentinel meaning the environment has not been consulted yet.
const UNSET: i32 = i32::MIN;

static VERBOSITY: AtomicI32 = AtomicI32::new(UNSET);

lazy_static! {
  static ref VERBOSE_STREAM: Mutex<Stdout> = Mutex::new(stdout());
}


#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, IntoStaticStr)]
pub enum Channel {
  Error,
  Warning,
  Notice,
  Debug,
}


pub fn get_verbosity() -> i32 {
  let current = VERBOSITY.load(Ordering::Relaxed);
  if current != UNSET {
    return current;
  }

  let initial = std::env::var(VERBOSITY_VARIABLE)
      .ok()
      .and_then(|text| text.trim().parse::<i32>().ok())
      .unwrap_or(DEFAULT_VERBOSITY);
  // Another thread may have set the verbosity in the meantime. Theirs wins.
  match VERBOSITY.compare_exchange(UNSET, initial, Ordering::Relaxed, Ordering::Relaxed) {
    Ok(_) => initial,
    Err(already_set) => already_set,
  }
}

pub fn set_verbosity(new_value: i32) {
  VERBOSITY.store(new_value, Ordering::Relaxed);
}

/// Callers on hot paths check this before building an expensive message.
pub fn verbosity_is_at_least(level: i32) -> bool {
  get_verbosity() >= level
}

#[cfg(feature = "color")]
fn channel_tag(channel: Channel) -> String {
  use yansi::Paint;

  let name: &'static str = channel.into();
  let tag = format!("[{}]", name);
  match channel {
    Channel::Error   => Paint::red(tag).bold().to_string(),
    Channel::Warning => Paint::yellow(tag).to_string(),
    Channel::Notice  => Paint::green(tag).to_string(),
    Channel::Debug   => Paint::blue(tag).to_string(),
  }
}

#[cfg(not(feature = "color"))]
fn channel_tag(channel: Channel) -> String {
  format!("[{}]", channel)
}

pub(crate) fn verbose_emit(msg: &str) {
  let mut stream = match VERBOSE_STREAM.lock() {
    Ok(guard) => guard,
    Err(poisoned) => poisoned.into_inner(),
  };
  let _ = stream.write_all(msg.as_bytes());
  let _ = stream.write_all(b"\n");
}

/// Only emits a message if the verbosity level is at least `level`.
pub fn log(channel: Channel, level: i32, msg: &str) {
  if verbosity_is_at_least(level) {
    verbose_emit(format!("{} {}", channel_tag(channel), msg).as_str());
  }
}
