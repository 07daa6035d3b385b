use rand::Rng;

/// Fixed pool of opening lines for a fresh session.
///
/// No network call is made for the greeting; the widget picks one of these
/// locally so the conversation opens instantly even if the assistant endpoint
/// is having a bad day.
pub const GREETINGS: &[&str] = &[
    "Hey! I'm Otto, the AI assistant for Fluxstream. I can chat about AI, explain our services, \
     or get you in touch with our experts, Reid and Jake. So, what's on your mind?",
    "Hello there! Otto here, your guide to Fluxstream. Curious about how AI can streamline your \
     operations, or need to connect with Reid and Jake, our founders? I'm ready to assist!",
    "Welcome to Fluxstream! I'm Otto, your AI-powered assistant. I can provide information on our \
     custom automation solutions, discuss AI trends, or connect you with our experts. How can I \
     help you today?",
    "Otto at your service! Think of me as the friendly AI face of Fluxstream. I know a bit about \
     AI, a lot about what our team does, and I'm pretty good at fetching our experts if you need \
     them. What can I do for you?",
    "You've found Otto, Fluxstream's very own AI helper! I'm here to answer your questions about \
     our services, the magic of AI, or even to pass a message to our team. What adventure shall \
     we start with?",
    "Hi, I'm Otto! I assist Reid and Jake, the co-founders of Fluxstream, in connecting with \
     businesses looking for AI solutions. I can tell you about what we offer or help you schedule \
     a chat with them. What are you looking for today?",
    "Otto here, from Fluxstream! Ready to dive into AI solutions or connect with our experts? \
     Let's go!",
    "Considering AI for your business? I'm Otto, and I can show you how Fluxstream makes it \
     happen. Ask me about streamlining tasks, boosting efficiency, or I can help you get in \
     contact with our team!",
];

/// Pick one greeting uniformly at random.
pub fn pick_greeting<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GREETINGS[rng.gen_range(0..GREETINGS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_greeting_is_from_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let greeting = pick_greeting(&mut rng);
            assert!(GREETINGS.contains(&greeting));
        }
    }

    #[test]
    fn test_pick_greeting_is_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(pick_greeting(&mut a), pick_greeting(&mut b));
    }

    #[test]
    fn test_pool_eventually_varies() {
        let mut rng = StdRng::seed_from_u64(1);
        let first = pick_greeting(&mut rng);
        let varied = (0..100).any(|_| pick_greeting(&mut rng) != first);
        assert!(varied, "100 draws should not all land on the same greeting");
    }
}
