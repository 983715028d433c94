//! Static decoder corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative lines as the
//! radio decoder prints them, bare field names and all.

/// Meter id and label used as the one known meter in most harnesses.
pub const POTABLE_ID: &str = "701193108";
pub const POTABLE: &str = "POTABLE";

/// Well-formed decoder records, each with the id and consumption it carries.
pub const CORPUS_RECORDS: &[(&str, &str, i64)] = &[
    (
        "{Time:1,R900:{ID:701193108,Consumption:6056951}}",
        "701193108",
        6_056_951,
    ),
    (
        "{Time:1700000000,R900:{ID:701193108,Unkn1:163,NoUse:0,BackFlow:0,Consumption:6056952,Unkn3:0,Leak:0,LeakNow:0}}",
        "701193108",
        6_056_952,
    ),
    (
        "{Time:1700000060,R900:{ID:1550023411,Unkn1:163,NoUse:2,BackFlow:1,Consumption:120,Unkn3:0,Leak:4,LeakNow:1}}",
        "1550023411",
        120,
    ),
    (
        "  {Time:2, R900:{ID:42, Consumption:0}}  ",
        "42",
        0,
    ),
    (
        r#"{"Time":3,"R900":{"ID":7,"Consumption":99}}"#,
        "7",
        99,
    ),
];

/// Lines that must be discarded without output.
pub const CORPUS_NOISE: &[&str] = &[
    "",
    "   ",
    "not json at all",
    "Found Rafael Micro R820T tuner",
    "GainMode:Auto CenterFreq:912380000 SampleRate:2359296",
    "[R900] truncated",
    "{",
    "{R900:{ID:701193108,Consumption:",
    "{Time:1,R900:{ID:701193108,Consumption:6056951}",
    "{Time:2024-01-15T10:00:00,R900:{ID:1,Consumption:2}}",
    "{Time:1,Bogus:{ID:1,Consumption:2}}",
    "{Time:1,R900:{ID:1,Consumption:1.25}}",
    "{Time:1,R900:{ID:1,Consumption:true}}",
];

/// A realistic session: decoder banner, readings from a known and an unknown
/// meter, and noise in between.
pub const SESSION: &str = "\
Found Rafael Micro R820T tuner
{Time:1,R900:{ID:701193108,Consumption:6056951}}
GainMode:Auto CenterFreq:912380000
{Time:2,R900:{ID:999999999,Consumption:100}}
{Time:3,R900:{ID:701193108,Consumption:6056952}}
not json at all
{Time:4,R900:{ID:999999999,Consumption:98}}
";

/// Console lines the session above must produce, given a registry holding
/// only [`POTABLE_ID`].
pub const SESSION_EVENTS: &[&str] = &[
    "[POTABLE] Consumption: 6,056,951 (+0)",
    "[UNRECOGNIZED ID 999999999] Consumption: 100 (+0)",
    "[POTABLE] Consumption: 6,056,952 (+1)",
    "[UNRECOGNIZED ID 999999999] Consumption: 98 (-2)",
];

/// Render a decoder line for `id` and `consumption` the way the decoder does.
pub fn decoder_line(time: u64, id: &str, consumption: i64) -> String {
    format!(
        "{{Time:{time},R900:{{ID:{id},Unkn1:163,NoUse:0,BackFlow:0,Consumption:{consumption},Unkn3:0,Leak:0,LeakNow:0}}}}"
    )
}
