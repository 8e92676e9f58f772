/// Commands the UI sends down to the network worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkCommand {
    /// Run the `sendMessage` mutation.
    /// - ticket: issued by the chat state, echoed back with the reply
    /// - input: the text exactly as the user typed it
    SendMessage { ticket: u64, input: String },
}
