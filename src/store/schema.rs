//! Schema bootstrap SQL, installed idempotently by [`super::Store::bootstrap`].

/// `nodes` plus the chat-core tables and indexes, plus every VFS
/// primitive as a PL/pgSQL stored procedure over `nodes`.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS nodes (
    id              BIGSERIAL PRIMARY KEY,
    uuid            UUID NOT NULL UNIQUE,
    owner_id        BIGINT NOT NULL,
    root_key        TEXT NOT NULL,
    parent_path     TEXT NOT NULL,
    filename        TEXT NOT NULL,
    ordinal         INTEGER NOT NULL DEFAULT 0,
    is_directory    BOOLEAN NOT NULL,
    is_public       BOOLEAN NOT NULL DEFAULT FALSE,
    is_binary       BOOLEAN NOT NULL DEFAULT FALSE,
    content_text    TEXT,
    content_binary  BYTEA,
    content_type    TEXT,
    size_bytes      BIGINT NOT NULL DEFAULT 0,
    created_time    BIGINT NOT NULL,
    modified_time   BIGINT NOT NULL,
    UNIQUE (root_key, parent_path, filename)
);

CREATE INDEX IF NOT EXISTS nodes_root_parent_idx ON nodes (root_key, parent_path);
CREATE INDEX IF NOT EXISTS nodes_is_binary_idx ON nodes (is_binary);

CREATE TABLE IF NOT EXISTS blocked_keys (
    pub_key TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS user_info (
    id       BIGSERIAL PRIMARY KEY,
    pub_key  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS rooms (
    id   BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS messages (
    id          TEXT PRIMARY KEY,
    room_id     BIGINT NOT NULL REFERENCES rooms (id) ON DELETE CASCADE,
    state       TEXT NOT NULL,
    timestamp   BIGINT NOT NULL,
    sender      TEXT NOT NULL,
    content     TEXT NOT NULL,
    public_key  TEXT NOT NULL,
    signature   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS messages_room_id_idx ON messages (room_id);
CREATE INDEX IF NOT EXISTS messages_timestamp_idx ON messages (timestamp);

CREATE TABLE IF NOT EXISTS attachments (
    id         BIGSERIAL PRIMARY KEY,
    message_id TEXT NOT NULL REFERENCES messages (id) ON DELETE CASCADE,
    name       TEXT NOT NULL,
    type       TEXT NOT NULL,
    size       BIGINT NOT NULL,
    data       BYTEA NOT NULL
);

CREATE INDEX IF NOT EXISTS attachments_message_id_idx ON attachments (message_id);

-- Every VFS primitive below is a stored procedure over `nodes`; the Rust
-- layer issues `SELECT * FROM fn_name(...)` and never builds `nodes` SQL
-- by hand. Expected, non-internal failures (not found, already exists,
-- not authorized, ...) are signaled with a custom SQLSTATE per kind
-- (`VFS01`..`VFS07`) rather than a generic exception, so `crate::error`
-- can map them back onto named `Error` variants without parsing text.

CREATE OR REPLACE FUNCTION fn_next_ordinal(p_root_key text, p_parent_path text)
RETURNS integer AS $$
DECLARE
    v_max integer;
BEGIN
    SELECT MAX(ordinal) INTO v_max FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path;
    RETURN COALESCE(v_max + 1, 0);
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_stat(p_root_key text, p_parent_path text, p_name text)
RETURNS SETOF nodes AS $$
BEGIN
    RETURN QUERY
    SELECT * FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_readdir(p_root_key text, p_parent_path text)
RETURNS SETOF nodes AS $$
BEGIN
    RETURN QUERY
    SELECT * FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path
    ORDER BY ordinal ASC, filename ASC;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_get_descendants(p_root_key text, p_node_uuid uuid, p_root_path text)
RETURNS SETOF nodes AS $$
BEGIN
    RETURN QUERY
    SELECT * FROM nodes
    WHERE root_key = p_root_key
      AND (uuid = p_node_uuid OR parent_path = p_root_path OR parent_path LIKE p_root_path || '/%')
    ORDER BY parent_path ASC, ordinal ASC;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_check_auth(
    p_owner bigint, p_root_key text, p_parent_path text, p_name text, p_public_ok boolean
) RETURNS boolean AS $$
DECLARE
    v_node nodes%ROWTYPE;
BEGIN
    SELECT * INTO v_node FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;
    IF NOT FOUND THEN
        RETURN FALSE;
    END IF;
    RETURN p_owner = v_node.owner_id OR p_owner = 0 OR (p_public_ok AND v_node.is_public);
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_set_public(
    p_owner bigint, p_root_key text, p_parent_path text, p_name text, p_is_public boolean
) RETURNS void AS $$
DECLARE
    v_node nodes%ROWTYPE;
BEGIN
    SELECT * INTO v_node FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;
    IF NOT FOUND THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS01';
    END IF;
    IF p_owner <> v_node.owner_id AND p_owner <> 0 THEN
        RAISE EXCEPTION '' USING ERRCODE = 'VFS03';
    END IF;
    UPDATE nodes SET is_public = p_is_public, modified_time = (extract(epoch FROM clock_timestamp()) * 1000)::bigint
    WHERE id = v_node.id;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_read_file(p_owner bigint, p_root_key text, p_parent_path text, p_name text)
RETURNS bytea AS $$
DECLARE
    v_node nodes%ROWTYPE;
BEGIN
    SELECT * INTO v_node FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;
    IF NOT FOUND THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS01';
    END IF;
    IF v_node.is_directory THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS04';
    END IF;
    IF NOT (p_owner = v_node.owner_id OR p_owner = 0 OR v_node.is_public) THEN
        RAISE EXCEPTION '' USING ERRCODE = 'VFS03';
    END IF;
    IF v_node.is_binary THEN
        RETURN v_node.content_binary;
    ELSE
        RETURN convert_to(COALESCE(v_node.content_text, ''), 'UTF8');
    END IF;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_mkdir(
    p_owner bigint, p_root_key text, p_parent_path text, p_name text,
    p_ordinal integer, p_is_public boolean
) RETURNS SETOF nodes AS $$
DECLARE
    v_ordinal integer;
    v_now bigint;
BEGIN
    IF EXISTS (
        SELECT 1 FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name
    ) THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS02';
    END IF;

    v_ordinal := COALESCE(p_ordinal, fn_next_ordinal(p_root_key, p_parent_path));
    v_now := (extract(epoch FROM clock_timestamp()) * 1000)::bigint;

    RETURN QUERY
    INSERT INTO nodes
        (uuid, owner_id, root_key, parent_path, filename, ordinal,
         is_directory, is_public, is_binary, size_bytes, created_time, modified_time)
    VALUES
        (gen_random_uuid(), p_owner, p_root_key, p_parent_path, p_name, v_ordinal,
         TRUE, p_is_public, FALSE, 0, v_now, v_now)
    RETURNING *;
EXCEPTION
    WHEN unique_violation THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS02';
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_write_file(
    p_owner bigint, p_root_key text, p_parent_path text, p_name text,
    p_content_text text, p_content_binary bytea, p_is_binary boolean,
    p_ordinal integer, p_content_type text, p_overwrite boolean
) RETURNS SETOF nodes AS $$
DECLARE
    v_existing nodes%ROWTYPE;
    v_ordinal integer;
    v_size bigint;
    v_now bigint;
BEGIN
    v_now := (extract(epoch FROM clock_timestamp()) * 1000)::bigint;
    v_size := CASE WHEN p_is_binary THEN COALESCE(octet_length(p_content_binary), 0)
                   ELSE COALESCE(octet_length(p_content_text), 0) END;

    SELECT * INTO v_existing FROM nodes
        WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;

    IF FOUND AND p_overwrite THEN
        RETURN QUERY
        UPDATE nodes SET
            content_text = p_content_text,
            content_binary = p_content_binary,
            is_binary = p_is_binary,
            content_type = p_content_type,
            size_bytes = v_size,
            modified_time = v_now
        WHERE id = v_existing.id
        RETURNING *;
        RETURN;
    END IF;

    v_ordinal := COALESCE(p_ordinal, fn_next_ordinal(p_root_key, p_parent_path));

    BEGIN
        RETURN QUERY
        INSERT INTO nodes
            (uuid, owner_id, root_key, parent_path, filename, ordinal, is_directory,
             is_public, is_binary, content_text, content_binary, content_type,
             size_bytes, created_time, modified_time)
        VALUES
            (gen_random_uuid(), p_owner, p_root_key, p_parent_path, p_name, v_ordinal, FALSE,
             FALSE, p_is_binary, p_content_text, p_content_binary, p_content_type,
             v_size, v_now, v_now)
        RETURNING *;
    EXCEPTION
        WHEN unique_violation THEN
            RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS02';
    END;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_ensure_path(p_owner bigint, p_root_key text, p_full_path text)
RETURNS void AS $$
DECLARE
    v_parent text := '';
    v_component text;
BEGIN
    IF p_full_path = '' THEN
        RETURN;
    END IF;

    FOREACH v_component IN ARRAY string_to_array(p_full_path, '/')
    LOOP
        IF NOT EXISTS (
            SELECT 1 FROM nodes WHERE root_key = p_root_key AND parent_path = v_parent AND filename = v_component
        ) THEN
            BEGIN
                PERFORM fn_mkdir(p_owner, p_root_key, v_parent, v_component, NULL, FALSE);
            EXCEPTION
                WHEN others THEN
                    IF SQLSTATE <> 'VFS02' THEN
                        RAISE;
                    END IF;
            END;
        END IF;

        v_parent := CASE WHEN v_parent = '' THEN v_component ELSE v_parent || '/' || v_component END;
    END LOOP;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_rename(
    p_owner bigint, p_root_key text, p_old_parent text, p_old_name text,
    p_new_parent text, p_new_name text
) RETURNS TABLE(success boolean, diagnostic text) AS $$
DECLARE
    v_source nodes%ROWTYPE;
    v_old_prefix text;
    v_new_prefix text;
    v_like text;
BEGIN
    SELECT * INTO v_source FROM nodes WHERE root_key = p_root_key AND parent_path = p_old_parent AND filename = p_old_name;
    IF NOT FOUND THEN
        RETURN QUERY SELECT FALSE, 'not found'::text;
        RETURN;
    END IF;

    IF p_owner <> v_source.owner_id AND p_owner <> 0 THEN
        RAISE EXCEPTION '' USING ERRCODE = 'VFS03';
    END IF;

    IF EXISTS (
        SELECT 1 FROM nodes WHERE root_key = p_root_key AND parent_path = p_new_parent AND filename = p_new_name
    ) THEN
        RETURN QUERY SELECT FALSE, 'already exists'::text;
        RETURN;
    END IF;

    v_old_prefix := CASE WHEN p_old_parent = '' THEN p_old_name ELSE p_old_parent || '/' || p_old_name END;
    v_new_prefix := CASE WHEN p_new_parent = '' THEN p_new_name ELSE p_new_parent || '/' || p_new_name END;

    UPDATE nodes SET parent_path = p_new_parent, filename = p_new_name,
        modified_time = (extract(epoch FROM clock_timestamp()) * 1000)::bigint
    WHERE id = v_source.id;

    IF v_source.is_directory THEN
        v_like := v_old_prefix || '/%';
        UPDATE nodes SET parent_path = v_new_prefix || substr(parent_path, length(v_old_prefix) + 1)
        WHERE root_key = p_root_key AND (parent_path = v_old_prefix OR parent_path LIKE v_like);
    END IF;

    RETURN QUERY SELECT TRUE, NULL::text;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_unlink(p_owner bigint, p_root_key text, p_parent_path text, p_name text)
RETURNS void AS $$
DECLARE
    v_node nodes%ROWTYPE;
BEGIN
    SELECT * INTO v_node FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;
    IF NOT FOUND THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS01';
    END IF;
    IF v_node.is_directory THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS04';
    END IF;
    IF p_owner <> v_node.owner_id AND p_owner <> 0 THEN
        RAISE EXCEPTION '' USING ERRCODE = 'VFS03';
    END IF;
    DELETE FROM nodes WHERE id = v_node.id;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_rmdir(
    p_owner bigint, p_root_key text, p_parent_path text, p_name text, p_recursive boolean, p_force boolean
) RETURNS void AS $$
DECLARE
    v_node nodes%ROWTYPE;
    v_full_path text;
    v_like text;
    v_has_children boolean;
BEGIN
    SELECT * INTO v_node FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;
    IF NOT FOUND THEN
        IF p_force THEN
            RETURN;
        END IF;
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS01';
    END IF;

    IF NOT v_node.is_directory THEN
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS05';
    END IF;

    IF p_owner <> v_node.owner_id AND p_owner <> 0 THEN
        RAISE EXCEPTION '' USING ERRCODE = 'VFS03';
    END IF;

    v_full_path := CASE WHEN p_parent_path = '' THEN p_name ELSE p_parent_path || '/' || p_name END;

    IF NOT p_recursive THEN
        SELECT EXISTS (SELECT 1 FROM nodes WHERE root_key = p_root_key AND parent_path = v_full_path) INTO v_has_children;
        IF v_has_children THEN
            RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS06';
        END IF;
        DELETE FROM nodes WHERE id = v_node.id;
        RETURN;
    END IF;

    v_like := v_full_path || '/%';
    DELETE FROM nodes
    WHERE id = v_node.id OR (root_key = p_root_key AND (parent_path = v_full_path OR parent_path LIKE v_like));
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_rm(
    p_owner bigint, p_root_key text, p_parent_path text, p_name text, p_recursive boolean, p_force boolean
) RETURNS void AS $$
DECLARE
    v_node nodes%ROWTYPE;
BEGIN
    SELECT * INTO v_node FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_name;
    IF NOT FOUND THEN
        IF p_force THEN
            RETURN;
        END IF;
        RAISE EXCEPTION '%', p_name USING ERRCODE = 'VFS01';
    END IF;

    IF v_node.is_directory THEN
        PERFORM fn_rmdir(p_owner, p_root_key, p_parent_path, p_name, p_recursive, p_force);
    ELSE
        PERFORM fn_unlink(p_owner, p_root_key, p_parent_path, p_name);
    END IF;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_shift_ordinals_down(
    p_root_key text, p_parent_path text, p_insert_ordinal integer, p_slots integer
) RETURNS void AS $$
BEGIN
    UPDATE nodes SET ordinal = ordinal + p_slots
    WHERE root_key = p_root_key AND parent_path = p_parent_path AND ordinal >= p_insert_ordinal;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_set_ordinal(p_root_key text, p_parent_path text, p_filename text, p_ordinal integer)
RETURNS void AS $$
BEGIN
    UPDATE nodes SET ordinal = p_ordinal
    WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_filename;
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_search_text_candidates(p_root_key text, p_parent_path text)
RETURNS SETOF nodes AS $$
BEGIN
    RETURN QUERY
    SELECT * FROM nodes
    WHERE root_key = p_root_key AND is_binary = FALSE AND is_directory = FALSE
      AND (parent_path = p_parent_path OR parent_path LIKE p_parent_path || '/%');
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_search_binary_candidates(p_root_key text, p_parent_path text)
RETURNS SETOF nodes AS $$
BEGIN
    RETURN QUERY
    SELECT * FROM nodes
    WHERE root_key = p_root_key AND is_binary = TRUE
      AND (parent_path = p_parent_path OR parent_path LIKE p_parent_path || '/%');
END;
$$ LANGUAGE plpgsql;

CREATE OR REPLACE FUNCTION fn_swap_with_neighbor(
    p_root_key text, p_parent_path text, p_filename text, p_direction text
) RETURNS void AS $$
DECLARE
    v_node nodes%ROWTYPE;
    v_neighbor nodes%ROWTYPE;
BEGIN
    SELECT * INTO v_node FROM nodes WHERE root_key = p_root_key AND parent_path = p_parent_path AND filename = p_filename;
    IF NOT FOUND THEN
        RAISE EXCEPTION '%', p_filename USING ERRCODE = 'VFS01';
    END IF;

    IF p_direction = 'up' THEN
        SELECT * INTO v_neighbor FROM nodes
            WHERE root_key = p_root_key AND parent_path = p_parent_path AND ordinal < v_node.ordinal
            ORDER BY ordinal DESC LIMIT 1;
    ELSE
        SELECT * INTO v_neighbor FROM nodes
            WHERE root_key = p_root_key AND parent_path = p_parent_path AND ordinal > v_node.ordinal
            ORDER BY ordinal ASC LIMIT 1;
    END IF;

    IF NOT FOUND THEN
        RETURN;
    END IF;

    UPDATE nodes SET ordinal = v_node.ordinal WHERE id = v_neighbor.id;
    UPDATE nodes SET ordinal = v_neighbor.ordinal WHERE id = v_node.id;
END;
$$ LANGUAGE plpgsql;
"#;
