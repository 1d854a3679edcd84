//! In-place mutations of a statistics document
//!
//! Every change to a problem detail adjusts the aggregate counters in the same call,
//! so `solvedProblems` and the per-topic `solved` always match the details.

use dsadash_core::{ProblemDetail, StatisticsDocument, TopicStat};

/// Set the solved flag of `problem_name` in `topic`.
///
/// Returns `true` when the document changed. Unknown topics or names and requests
/// for the current state leave the document untouched, `lastUpdated` included.
pub fn apply_problem_status(
    document: &mut StatisticsDocument,
    topic: &str,
    problem_name: &str,
    solved: bool,
) -> bool {
    let Some(detail) = document
        .problem_details
        .get_mut(topic)
        .and_then(|details| details.iter_mut().find(|detail| detail.name == problem_name))
    else {
        return false;
    };

    if detail.solved == solved {
        return false;
    }
    detail.solved = solved;

    let topic_stat = document.topic_stats.iter_mut().find(|stat| stat.name == topic);
    if solved {
        document.solved_problems = document.solved_problems.saturating_add(1);
        if let Some(stat) = topic_stat {
            stat.solved = stat.solved.saturating_add(1);
        }
    } else {
        document.solved_problems = document.solved_problems.saturating_sub(1);
        if let Some(stat) = topic_stat {
            stat.solved = stat.solved.saturating_sub(1);
        }
    }

    document.touch();
    true
}

/// Append `problem` to `topic`, creating the topic if needed, and bump every counter
pub fn apply_add_problem(document: &mut StatisticsDocument, topic: &str, problem: ProblemDetail) {
    if document.topic_stat_mut(topic).is_none() {
        document.topic_stats.push(TopicStat {
            name: topic.to_string(),
            total: 0,
            solved: 0,
        });
    }

    let solved = problem.solved;
    let difficulty = problem.difficulty.clone();

    document
        .problem_details
        .entry(topic.to_string())
        .or_default()
        .push(problem);

    document.total_problems += 1;
    if solved {
        document.solved_problems += 1;
    }
    if let Some(stat) = document.topic_stat_mut(topic) {
        stat.total += 1;
        if solved {
            stat.solved += 1;
        }
    }
    *document.difficulty_stats.entry(difficulty).or_insert(0) += 1;

    document.touch();
}
