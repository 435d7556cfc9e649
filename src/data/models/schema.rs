// Kept in sync by hand with `data::migrations::SCHEMA_SQL`.

diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        first_name -> Text,
        last_name -> Text,
        index_number -> Text,
        hall_of_residence -> Text,
        department -> Text,
        phone_number -> Text,
        profile_picture_url -> Nullable<Text>,
        account_type -> Text,
        is_verified -> Bool,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    business_owners (id) {
        id -> Integer,
        user_id -> Integer,
        business_license_number -> Nullable<Text>,
        verification_documents -> Nullable<Text>,
        is_verified -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    businesses (id) {
        id -> Integer,
        owner_id -> Integer,
        name -> Text,
        description -> Nullable<Text>,
        category -> Text,
        location -> Text,
        contact_number -> Text,
        whatsapp_link -> Nullable<Text>,
        instagram_handle -> Nullable<Text>,
        logo_url -> Nullable<Text>,
        is_verified -> Bool,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    products (id) {
        id -> Integer,
        business_id -> Integer,
        name -> Text,
        description -> Nullable<Text>,
        price_cents -> BigInt,
        image_url -> Nullable<Text>,
        category -> Text,
        stock_quantity -> Integer,
        is_available -> Bool,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    orders (id) {
        id -> Integer,
        user_id -> Integer,
        business_id -> Integer,
        total_amount_cents -> BigInt,
        delivery_address -> Text,
        delivery_instructions -> Nullable<Text>,
        payment_method -> Text,
        status -> Text,
        cancellation_reason -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    order_items (id) {
        id -> Integer,
        order_id -> Integer,
        product_id -> Integer,
        quantity -> Integer,
        unit_price_cents -> BigInt,
        created_at -> Timestamp,
    }
}

diesel::table! {
    reviews (id) {
        id -> Integer,
        user_id -> Integer,
        business_id -> Integer,
        rating -> Integer,
        comment -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    categories (id) {
        id -> Integer,
        name -> Text,
        description -> Nullable<Text>,
        icon_class -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(business_owners -> users (user_id));
diesel::joinable!(businesses -> business_owners (owner_id));
diesel::joinable!(products -> businesses (business_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(orders -> businesses (business_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(reviews -> businesses (business_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    business_owners,
    businesses,
    products,
    orders,
    order_items,
    reviews,
    categories,
);
