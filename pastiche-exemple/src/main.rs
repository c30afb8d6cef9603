use std::fs;

use pastiche_core::model::talk_model::TalkModel;
use pastiche_core::santa::SantaModule;

const SAVE_FILE: &str = "pastiche_model.txt";

const SAMPLE_TEXT: &str = "\
The cat sat on the mat. The cat looked at the rain. \
I like the rain, said the cat. I like the mat too. \
Do you like cats? I do! The rain fell on the mat all day. \
The day was long... The cat slept on the mat.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Build a trigram model and learn the sample text under an id.
    // Relearning the same id would fail, forgetting it removes exactly
    // this text's counts.
    let mut model = TalkModel::new(3)?;
    model.learn_text("sample", SAMPLE_TEXT)?;

    // Replies are seeded by the last words of the prompt; unknown words
    // restart generation at a sentence boundary
    for prompt in ["what about the cat", "do you like the rain"] {
        println!("> {prompt}");
        println!("< {}", model.generate_reply(prompt));
    }

    // A fixed seed makes the draw reproducible
    println!("seeded: {}", model.generate_text("the cat", 20, 2, Some("demo")));

    // Persistence is plain text; reading and writing files is the
    // caller's job
    fs::write(SAVE_FILE, model.serialize()?)?;
    let mut restored = TalkModel::new(3)?;
    restored.deserialize(&fs::read_to_string(SAVE_FILE)?)?;
    println!("restored texts: {:?}", restored.text_ids());

    // Secret Santa: first line participants, further lines forbidden
    // (sender, receiver) pairs
    let mut santa = SantaModule::new();
    santa.initialize_from_str("alice,bob,carol,dave\nalice,bob")?;
    santa.draw(Some("xmas-2025"))?;
    for name in ["alice", "bob", "carol", "dave"] {
        match santa.assignment_for(name) {
            Some(receiver) => println!("{name} gives a gift to {receiver}"),
            None => println!("{name} is not part of the draw"),
        }
    }

    Ok(())
}
