/// Text commands for control panels, e.g. `size 250; rotate-x off; ortho toggle`
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, multispace0, one_of, space0, space1},
    combinator::{all_consuming, map, not, opt, recognize, value},
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};
use thiserror::Error;

use crate::projection::ProjectionMode;
use crate::settings::{Settings, SettingsError, SettingsUpdate};
use crate::transform::Axis;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("could not parse command {input:?} near {rest:?}")]
    Syntax { input: String, rest: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Switch {
    On,
    Off,
    Toggle,
}

/// Parse a batch of commands into settings updates, in input order
pub fn parse_commands(input: &str) -> Result<Vec<SettingsUpdate>, CommandError> {
    if input.trim().is_empty() {
        return Err(CommandError::Empty);
    }
    match all_consuming(delimited(multispace0, statements, multispace0))(input) {
        Ok((_, updates)) => Ok(updates),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(CommandError::Syntax {
            input: input.to_string(),
            rest: e.input.to_string(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(CommandError::Syntax {
            input: input.to_string(),
            rest: String::new(),
        }),
    }
}

/// Parse `input` and apply every update to `settings`.
///
/// The batch is all-or-nothing: on any error `settings` is left untouched.
pub fn apply_commands(settings: &mut Settings, input: &str) -> Result<usize, CommandError> {
    let updates = parse_commands(input)?;
    let mut staged = *settings;
    for update in &updates {
        staged.apply(*update)?;
    }
    *settings = staged;
    Ok(updates.len())
}

fn statements(input: &str) -> IResult<&str, Vec<SettingsUpdate>> {
    terminated(
        separated_list1(delimited(space0, one_of(";,"), multispace0), statement),
        opt(preceded(space0, one_of(";,"))),
    )(input)
}

fn statement(input: &str) -> IResult<&str, SettingsUpdate> {
    alt((size, distance, rotate, projection))(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(space0, char('='), space0)),
        value((), space1),
    ))(input)
}

fn size(input: &str) -> IResult<&str, SettingsUpdate> {
    let (rest, _) = pair(tag_no_case("size"), separator)(input)?;
    map(signed_number, |(relative, v)| {
        if relative {
            SettingsUpdate::NudgeSize(v)
        } else {
            SettingsUpdate::Size(v)
        }
    })(rest)
}

fn distance(input: &str) -> IResult<&str, SettingsUpdate> {
    let (rest, _) = pair(
        alt((tag_no_case("distance"), tag_no_case("dist"))),
        separator,
    )(input)?;
    map(signed_number, |(relative, v)| {
        if relative {
            SettingsUpdate::NudgeDistance(v)
        } else {
            SettingsUpdate::Distance(v)
        }
    })(rest)
}

/// An absolute value, or a signed delta when written with a leading `+`/`-`
fn signed_number(input: &str) -> IResult<&str, (bool, f32)> {
    let unsigned = preceded(not(one_of("+-")), float);
    map(pair(opt(one_of("+-")), unsigned), |(sign, magnitude)| match sign {
        Some('+') => (true, magnitude),
        Some(_) => (true, -magnitude),
        None => (false, magnitude),
    })(input)
}

fn axis(input: &str) -> IResult<&str, Axis> {
    preceded(
        opt(alt((tag_no_case("rotate-"), tag_no_case("rotate_")))),
        alt((
            value(Axis::X, tag_no_case("x")),
            value(Axis::Y, tag_no_case("y")),
            value(Axis::Z, tag_no_case("z")),
        )),
    )(input)
}

fn switch(input: &str) -> IResult<&str, Switch> {
    alt((
        value(Switch::Toggle, tag_no_case("toggle")),
        value(Switch::On, alt((tag_no_case("on"), tag_no_case("true")))),
        value(Switch::Off, alt((tag_no_case("off"), tag_no_case("false")))),
    ))(input)
}

fn rotate(input: &str) -> IResult<&str, SettingsUpdate> {
    map(
        pair(terminated(axis, separator), switch),
        |(axis, switch)| match switch {
            Switch::On => SettingsUpdate::Rotate(axis, true),
            Switch::Off => SettingsUpdate::Rotate(axis, false),
            Switch::Toggle => SettingsUpdate::ToggleRotation(axis),
        },
    )(input)
}

fn projection(input: &str) -> IResult<&str, SettingsUpdate> {
    alt((orthographic_switch, projection_mode))(input)
}

fn orthographic_switch(input: &str) -> IResult<&str, SettingsUpdate> {
    map(
        preceded(
            pair(
                recognize(pair(tag_no_case("ortho"), opt(tag_no_case("graphic")))),
                separator,
            ),
            switch,
        ),
        |switch| match switch {
            Switch::On => SettingsUpdate::Projection(ProjectionMode::Orthographic),
            Switch::Off => SettingsUpdate::Projection(ProjectionMode::Perspective),
            Switch::Toggle => SettingsUpdate::ToggleProjection,
        },
    )(input)
}

fn projection_mode(input: &str) -> IResult<&str, SettingsUpdate> {
    preceded(
        pair(tag_no_case("projection"), separator),
        alt((
            value(SettingsUpdate::ToggleProjection, tag_no_case("toggle")),
            value(
                SettingsUpdate::Projection(ProjectionMode::Orthographic),
                alt((tag_no_case("orthographic"), tag_no_case("ortho"))),
            ),
            value(
                SettingsUpdate::Projection(ProjectionMode::Perspective),
                alt((tag_no_case("perspective"), tag_no_case("persp"))),
            ),
        )),
    )(input)
}
