use crate::domain::{Label, Record};

const SAMPLE_CORPUS: &[(Label, &str)] = &[
    (Label::Ham, "Hey, are we still meeting for lunch tomorrow?"),
    (
        Label::Spam,
        "Congratulations! You've won a free iPhone. Click here to claim your prize now!",
    ),
    (Label::Ham, "Can you send me the project report by Friday?"),
    (
        Label::Spam,
        "URGENT! Your bank account has been suspended. Verify your details immediately.",
    ),
    (Label::Ham, "Don't forget the team meeting at 3 PM today."),
    (
        Label::Spam,
        "Win cash prizes now! Text WIN to 80085 to claim your reward.",
    ),
    (Label::Ham, "Happy birthday! Hope you have a wonderful day."),
    (
        Label::Spam,
        "Limited time offer: get 50% off all products. Buy now before it ends!",
    ),
    (Label::Ham, "I'll call you later tonight after work."),
    (
        Label::Spam,
        "You have been selected for a free vacation. Reply YES to claim.",
    ),
    (
        Label::Ham,
        "Thanks for the update, see you at the meeting tomorrow.",
    ),
    (
        Label::Spam,
        "Your package delivery failed. Update your shipping details here urgently.",
    ),
    (
        Label::Ham,
        "Please review the attached document before our call.",
    ),
    (
        Label::Spam,
        "Claim your free gift card today! Click the link to redeem.",
    ),
    (Label::Ham, "Are you coming to the dinner party on Saturday?"),
];

/// Messages classified after training when `INFERENCE_MESSAGES` is unset.
pub const SAMPLE_MESSAGES: &[&str] = &[
    "Meeting reminder for tomorrow at 10 AM.",
    "URGENT! Your Amazon parcel is pending delivery. Update shipping details to avoid delays.",
    "Congratulations, you won a free cruise! Click to claim.",
    "Can we move lunch to Friday?",
];

pub fn sample_records() -> Vec<Record> {
    SAMPLE_CORPUS
        .iter()
        .map(|(label, text)| Record::new(*label, *text))
        .collect()
}
