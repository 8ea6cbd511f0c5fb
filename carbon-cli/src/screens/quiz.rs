use anyhow::Result;

use carbon_core::quiz::{Question, Quiz, QuizPhase};
use carbon_core::router::Route;

use crate::app::{App, Nav};
use crate::console::Console;

/// Asks `question`, reports right or wrong and explains.
/// Returns `false` once input is exhausted.
fn ask<C: Console>(
    app: &mut App<'_, C>,
    quiz: &mut Quiz,
    index: usize,
    question: &Question,
) -> Result<bool> {
    app.line("")?;
    app.say(
        "quiz.progress",
        &[
            ("n", &(index + 1).to_string()),
            ("total", &quiz.total().to_string()),
        ],
    )?;
    app.say(&question.prompt_key(), &[])?;

    let choices: Vec<String> = (0..question.choices)
        .map(|i| app.t.t(&question.choice_key(i)))
        .collect();
    let Some(choice) = app.choose(&choices)? else {
        return Ok(false);
    };

    if quiz.answer(choice)? {
        app.say("quiz.correct", &[])?;
    } else {
        app.say("quiz.wrong", &[("answer", &choices[question.answer])])?;
    }
    app.say(&question.explanation_key(), &[])?;
    Ok(true)
}

pub fn show<C: Console>(app: &mut App<'_, C>) -> Result<Nav> {
    let mut quiz = Quiz::new();

    app.heading("quiz.title")?;
    app.say("quiz.intro", &[])?;
    match app.choose_keys(&["quiz.start", "nav.dashboard"])? {
        Some(0) => {
            quiz.start()?;
        }
        Some(_) => return Ok(Nav::To(Route::Dashboard)),
        None => return Ok(Nav::Quit),
    }

    loop {
        match quiz.phase() {
            QuizPhase::Question(index) => {
                let Some(question) = quiz.current() else {
                    return Ok(Nav::To(Route::Dashboard));
                };
                if !ask(app, &mut quiz, index, question)? {
                    return Ok(Nav::Quit);
                }
                quiz.next()?;
            }
            QuizPhase::Finished => {
                app.line("")?;
                app.say(
                    "quiz.finished",
                    &[
                        ("score", &quiz.score().to_string()),
                        ("total", &quiz.total().to_string()),
                    ],
                )?;
                match app.choose_keys(&["quiz.restart", "nav.dashboard"])? {
                    Some(0) => {
                        quiz.restart();
                    }
                    Some(_) => return Ok(Nav::To(Route::Dashboard)),
                    None => return Ok(Nav::Quit),
                }
            }
            QuizPhase::Intro => {
                quiz.start()?;
            }
        }
    }
}
