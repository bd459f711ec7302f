use std::io::{self, BufRead, Write};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::progress::CompletionSet;
use crate::record::{ChoiceKey, QuestionRecord};

#[derive(Debug, Clone, Copy, Default)]
pub struct QuizOptions {
    /// Session length; prompted for when absent or out of range.
    pub count: Option<usize>,
    /// Print the rationale after each answer.
    pub explain: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Ids answered this session, in the order they were asked.
    pub answered: Vec<String>,
    pub correct: usize,
    /// Input ran out before the planned questions were all answered.
    pub ended_early: bool,
}

/// Records not yet in the completion set, in store order.
pub fn available<'a>(records: &'a [QuestionRecord], done: &CompletionSet) -> Vec<&'a QuestionRecord> {
    records.iter().filter(|r| !done.contains(&r.id)).collect()
}

/// One interactive practice session over `pool`.
///
/// Reads answers line by line from `input`; end of input stops the session
/// and whatever was answered so far is still reported.
pub fn run_session<R, W, G>(
    mut pool: Vec<&QuestionRecord>,
    opts: QuizOptions,
    input: &mut R,
    out: &mut W,
    rng: &mut G,
) -> io::Result<SessionSummary>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut summary = SessionSummary::default();

    if pool.is_empty() {
        writeln!(out, "Congratulations! You have completed all available questions.")?;
        return Ok(summary);
    }

    writeln!(out, "\nWelcome to the SAT ELA Test Practice!")?;
    writeln!(out, "You have {} uncompleted questions available.", pool.len())?;

    let Some(count) = choose_count(pool.len(), opts.count, input, out)? else {
        summary.ended_early = true;
        return Ok(summary);
    };

    pool.shuffle(rng);
    pool.truncate(count);

    writeln!(out, "\n--- Starting Test ---")?;
    for (i, q) in pool.iter().enumerate() {
        show_question(out, i, pool.len(), q)?;

        let Some(answer) = read_answer(input, out)? else {
            summary.ended_early = true;
            break;
        };

        writeln!(out, "\nYour answer: {}", answer)?;
        writeln!(out, "Correct answer: {}", q.correct_answer)?;
        if answer == q.correct_answer {
            summary.correct += 1;
            writeln!(out, "Result: Correct!")?;
        } else {
            writeln!(out, "Result: Incorrect.")?;
        }
        if opts.explain && !q.explanation.is_empty() {
            writeln!(out, "\nExplanation:\n{}", q.explanation)?;
        }
        summary.answered.push(q.id.clone());

        if i + 1 < pool.len() {
            write!(out, "\nPress Enter to continue to the next question...")?;
            out.flush()?;
            if read_line(input)?.is_none() {
                summary.ended_early = true;
                break;
            }
        }
    }

    Ok(summary)
}

fn show_question<W: Write>(out: &mut W, i: usize, total: usize, q: &QuestionRecord) -> io::Result<()> {
    writeln!(out, "\nQuestion {} of {} (ID: {})", i + 1, total, q.id)?;
    writeln!(
        out,
        "Domain: {} | Skill: {} | Difficulty: {}",
        q.category_path.domain, q.category_path.skill, q.difficulty
    )?;
    writeln!(out, "\n{}", q.question_text)?;
    for (key, text) in q.choices.iter() {
        writeln!(out, "{}. {}", key, text)?;
    }
    Ok(())
}

/// `None` means input ended before a usable count was given.
fn choose_count<R: BufRead, W: Write>(
    available: usize,
    preset: Option<usize>,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<usize>> {
    match preset {
        Some(n) if (1..=available).contains(&n) => return Ok(Some(n)),
        Some(_) => writeln!(out, "Please enter a number between 1 and {}.", available)?,
        None => {}
    }

    loop {
        write!(out, "How many questions do you want for this ELA test (1-{})? ", available)?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=available).contains(&n) => return Ok(Some(n)),
            Ok(_) => writeln!(out, "Please enter a number between 1 and {}.", available)?,
            Err(_) => writeln!(out, "Invalid input. Please enter a number.")?,
        }
    }
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<ChoiceKey>> {
    loop {
        write!(out, "Your answer (A, B, C, D): ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let mut chars = line.trim().chars();
        match (chars.next().and_then(ChoiceKey::from_letter), chars.next()) {
            (Some(key), None) => return Ok(Some(key)),
            _ => writeln!(out, "Invalid choice. Please enter A, B, C, or D.")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

// ── Tests ──
