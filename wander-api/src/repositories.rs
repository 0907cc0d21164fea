use crate::endpoints::{
    chats::ListChatRooms,
    posts::{CreateComment, GetPost, ListComments, ListPosts},
    trips::{GetTrip, ListTrips},
    users::{GetProfile, ListSettlementAccounts},
};

pub struct TripRepository;

impl TripRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListTrips {
        ListTrips::new()
    }

    pub fn get(&self, id: i64) -> GetTrip {
        GetTrip::new(id)
    }
}

pub struct PostRepository;

impl PostRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListPosts {
        ListPosts::new()
    }

    pub fn get(&self, id: i64) -> GetPost {
        GetPost::new(id)
    }

    pub fn comments(&self, post_id: i64) -> CommentRepository {
        CommentRepository { post_id }
    }
}

pub struct CommentRepository {
    post_id: i64,
}

impl CommentRepository {
    pub fn list(&self) -> ListComments {
        ListComments::new(self.post_id)
    }

    pub fn create(&self, content: impl Into<String>) -> CreateComment {
        CreateComment::new(self.post_id, content)
    }
}

pub struct ChatRepository;

impl ChatRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListChatRooms {
        ListChatRooms::new()
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn me(&self) -> GetProfile {
        GetProfile
    }

    pub fn settlement_accounts(&self) -> ListSettlementAccounts {
        ListSettlementAccounts
    }
}
