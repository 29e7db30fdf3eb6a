use serde_json::Value;

use super::render::literal;
use crate::models::chat::ChatMessage;

const PERSONA: &str = "You are a creative assistant designed to suggest novel and useful ideas.";

/// "B": asks whether the problem list misses anything from the description.
pub fn decompose_problem(problem: &str, problems: &Value) -> Vec<ChatMessage> {
    let developer = format!(
        "{PERSONA}\n\
         Your task is to decompose the PROBLEM DESCRIPTION below:\n\
         ### PROBLEM DESCRIPTION ###\n\
         {problem}\n\
         \n"
    );
    let user = format!(
        "The following problems are listed from the PROBLEM DESCRIPTION:\n\
         ### PROBLEM LIST ###\n\
         {problems}\n\
         \n\
         Is there a problem missing from the PROBLEM DESCRIPTION?\n\
         If all problems are listed, reply \"No more problems to list.\"\n\
         If there is an unlisted problem, write one in a short subject-verb-object/adjective sentence.\n\
         Show only the result as a plain text.",
        problems = literal(problems),
    );
    vec![ChatMessage::developer(developer), ChatMessage::user(user)]
}

/// "C": asks for one cause of difficulty not already listed.
pub fn diagnose_problem(problem: &str, problems: &Value, difficulties: &Value) -> Vec<ChatMessage> {
    let developer = format!(
        "{PERSONA}\n\
         Your task is to suggest NEW perspectives on the PROBLEM CONTEXT below:\n\
         ### PROBLEM CONTEXT ###\n\
         {problem}\n\
         \n"
    );
    let user = format!(
        "Here are the main PROBLEMS identified so far:\n\
         ### PROBLEMS ###\n\
         {problems}\n\
         \n\
         Here are why we think the problems are difficult to solve:\n\
         ### DIFFICULTIES ###\n\
         {difficulties}\n\
         \n\
         What makes the PROBLEMS difficult to solve?\n\
         Write a very short causality that does not exist in the DIFFICULTIES.\n\
         Show only the result.",
        problems = literal(problems),
        difficulties = literal(difficulties),
    );
    vec![ChatMessage::developer(developer), ChatMessage::user(user)]
}

/// "D": asks for a new framing in the "The problem is not that ..." form.
pub fn reframe_problem(problem: &str, frames: &Value, solutions: &Value) -> Vec<ChatMessage> {
    let developer = format!(
        "{PERSONA}\n\
         Your task is to think about how else the problem can be approached to bring benefits beyond solving the original problems.\n\
         ### PROBLEM CONTEXT ###\n\
         {problem}\n\
         \n\
         You MUST randomly pick one problem keyword from the PROBLEM CONTEXT and think about a preferable state of that keyword."
    );
    let user = format!(
        "{history}\
         How else can we think about the problem?\n\
         Suggest an original idea that does not exist in the PROBLEM CONTEXT, PROBLEM FRAMES and POTENTIAL SOLUTIONS.\n\
         Write it in a very short sentence with a simple vocabulary.\n\
         Show only the result in the following format:\n\
         The problem is not that ... The problem is that ...",
        history = explored_so_far(frames, solutions),
    );
    vec![ChatMessage::developer(developer), ChatMessage::user(user)]
}

/// "E": asks for a new solution in the "What if ..." form.
pub fn suggest_solution(problem: &str, frames: &Value, solutions: &Value) -> Vec<ChatMessage> {
    let developer = format!(
        "{PERSONA}\n\
         Your task is to think about creative solutions to bring benefits beyond solving the original problems.\n\
         ### PROBLEM CONTEXT ###\n\
         {problem}\n\
         \n"
    );
    let user = format!(
        "{history}\
         What else could be a solution?\n\
         Suggest a new idea that does not exist in the PROBLEM CONTEXT, PROBLEM FRAMES and POTENTIAL SOLUTIONS.\n\
         Write it in a very short sentence with a simple vocabulary.\n\
         Show only the result in the following format:\n\
         What if ...",
        history = explored_so_far(frames, solutions),
    );
    vec![ChatMessage::developer(developer), ChatMessage::user(user)]
}

// Shared preamble of the "D" and "E" user turns.
fn explored_so_far(frames: &Value, solutions: &Value) -> String {
    format!(
        "Here are PROBLEM FRAMES and POTENTIAL SOLUTIONS explored so far:\n\
         ### PROBLEM FRAMES ###\n\
         {frames}\n\
         \n\
         ### POTENTIAL SOLUTIONS ###\n\
         {solutions}\n\
         \n",
        frames = literal(frames),
        solutions = literal(solutions),
    )
}
