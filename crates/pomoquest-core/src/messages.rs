//! Rotating encouragement messages shown while the countdown runs.

use crate::timer::Phase;

pub const CHEER_MESSAGES: [&str; 15] = [
    "You Can Do It!",
    "I believe in you!",
    "You're amazing!",
    "Keep going!",
    "Stay focused!",
    "You've got this!",
    "Never give up!",
    "You're unstoppable!",
    "One step at a time!",
    "Push through!",
    "You're doing great!",
    "Almost there!",
    "You’re stronger than you think!",
    "Keep shining!",
    "Proud of you!",
];

pub const BREAK_MESSAGES: [&str; 15] = [
    "Stay hydrated!",
    "Snacks, maybe?",
    "Text me!",
    "I love you <3",
    "Stretch your legs!",
    "Take a deep breath!",
    "Stand up and move a bit!",
    "Grab some fresh air!",
    "Quick eye break – look away!",
    "Time for a mini dance party!",
    "Eat something yummy!",
    "Close your eyes for a minute!",
    "Pet a pet if you have one!",
    "Hug yourself – you deserve it!",
    "Smile at yourself in the mirror!",
];

pub fn messages_for(phase: Phase) -> &'static [&'static str] {
    match phase {
        Phase::Work => &CHEER_MESSAGES,
        Phase::Break => &BREAK_MESSAGES,
    }
}

/// Cycles through the message list of one phase, starting at the first entry.
#[derive(Debug, Clone)]
pub struct EncouragementRotation {
    messages: &'static [&'static str],
    index: usize,
}

impl EncouragementRotation {
    pub fn new(phase: Phase) -> Self {
        Self {
            messages: messages_for(phase),
            index: 0,
        }
    }

    pub fn next_message(&mut self) -> &'static str {
        let text = self.messages[self.index];
        self.index = (self.index + 1) % self.messages.len();
        text
    }
}
