use callflow::flow::{RawEdge, RawFlow, RawNode};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fs;

/// A CLI tool to generate random call-flow descriptions for the layout engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The number of decision nodes in the generated tree
    #[arg(short, long, default_value_t = 4)]
    decisions: usize,

    /// Seed for reproducible output; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

const QUESTIONS: [&str; 6] = [
    "Is the caller the homeowner?",
    "Interested in a free quote?",
    "Is the caller available tomorrow?",
    "Does the caller qualify for financing?",
    "Has the caller booked before?",
    "Would the caller like a callback?",
];

const ACTIONS: [&str; 5] = [
    "Book appointment",
    "Transfer to a specialist",
    "Send follow-up SMS",
    "Schedule callback",
    "Update CRM record",
];

const BRANCH_LABELS: [(&str, &str); 4] = [
    ("Yes", "No"),
    ("Interested", "Not interested"),
    ("Qualified", "Rejected"),
    ("Confirmed", "Declined"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    println!(
        "Generating a call flow with {} decision(s)...",
        cli.decisions
    );

    let flow = generate_flow(&mut rng, cli.decisions);

    let json_output = serde_json::to_string_pretty(&flow)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} nodes and {} edges to '{}'",
        flow.nodes.len(),
        flow.edges.len(),
        cli.output
    );

    Ok(())
}

/// Grows a binary decision tree breadth first until `decisions` decision
/// nodes exist; every open branch then ends in an action, an end, or both.
fn generate_flow(rng: &mut StdRng, decisions: usize) -> RawFlow {
    let mut builder = FlowBuilder::default();

    let start = builder.node("start", "Call begins", None, None);
    let greeting = builder.node("message", "Greeting", Some("Hi, thanks for calling!"), None);
    builder.edge(&start, &greeting, None);

    if decisions == 0 {
        let end = builder.node("end", "Call ends", None, Some("neutral"));
        builder.edge(&greeting, &end, None);
        return builder.finish("Generated flow");
    }

    let mut open: VecDeque<(String, Option<String>)> = VecDeque::new();
    open.push_back((greeting, None));
    let mut remaining = decisions;

    while let Some((parent, label)) = open.pop_front() {
        if remaining == 0 {
            finish_branch(rng, &mut builder, &parent, label);
            continue;
        }
        remaining -= 1;

        let question = QUESTIONS[rng.random_range(0..QUESTIONS.len())];
        let decision = builder.node("decision", question, Some(question), None);
        builder.edge(&parent, &decision, label);

        let (yes, no) = BRANCH_LABELS[rng.random_range(0..BRANCH_LABELS.len())];
        open.push_back((decision.clone(), Some(yes.to_string())));
        open.push_back((decision, Some(no.to_string())));
    }

    builder.finish("Generated flow")
}

fn finish_branch(rng: &mut StdRng, builder: &mut FlowBuilder, parent: &str, label: Option<String>) {
    let negative = label
        .as_deref()
        .is_some_and(|l| BRANCH_LABELS.iter().any(|(_, no)| *no == l));

    if negative || !rng.random_bool(0.7) {
        let outcome = if negative { "failure" } else { "neutral" };
        let end = builder.node("end", "Call ends", None, Some(outcome));
        builder.edge(parent, &end, label);
        return;
    }

    let action = ACTIONS[rng.random_range(0..ACTIONS.len())];
    let action = builder.node("action", action, None, None);
    builder.edge(parent, &action, label);
    let end = builder.node("end", "Call ends", None, Some("success"));
    builder.edge(&action, &end, None);
}

#[derive(Default)]
struct FlowBuilder {
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

impl FlowBuilder {
    fn node(
        &mut self,
        node_type: &str,
        label: &str,
        content: Option<&str>,
        outcome: Option<&str>,
    ) -> String {
        let id = format!("{}_{}", node_type, self.nodes.len());
        self.nodes.push(RawNode {
            id: id.clone(),
            node_type: node_type.to_string(),
            label: Some(label.to_string()),
            content: content.map(str::to_string),
            outcome: outcome.map(str::to_string),
            ..Default::default()
        });
        id
    }

    fn edge(&mut self, source: &str, target: &str, label: Option<String>) {
        self.edges.push(RawEdge {
            source: source.to_string(),
            target: target.to_string(),
            label,
        });
    }

    fn finish(self, title: &str) -> RawFlow {
        RawFlow {
            title: title.to_string(),
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
