//! GraphQL documents sent to Healthie.

pub const CURRENT_USER_QUERY: &str = r#"
  query TestConnection {
    currentUser {
      id
      first_name
      last_name
    }
  }
"#;

pub const USERS_WITH_APPOINTMENTS_QUERY: &str = r#"
  query GetUsersWithAppointments {
    users {
      id
      first_name
      last_name
      has_completed_intake_forms
      next_app {
        id
        date
        location
        provider {
          id
          first_name
          last_name
          doc_share_id
        }
      }
      appointments {
        id
        date
        location
        provider {
          id
          first_name
          last_name
          doc_share_id
        }
      }
    }
  }
"#;

pub const CREATE_CONVERSATION_MUTATION: &str = r#"
  mutation CreateConversation($simple_added_users: String!, $name: String) {
    createConversation(input: { simple_added_users: $simple_added_users, name: $name }) {
      conversation { id }
      messages { field message }
    }
  }
"#;

pub const CREATE_NOTE_MUTATION: &str = r#"
  mutation CreateNote($user_id: String!, $content: String!, $conversation_id: String!) {
    createNote(input: { user_id: $user_id, content: $content, conversation_id: $conversation_id }) {
      note { id content user_id }
      messages { field message }
    }
  }
"#;
